// Macros for user-facing status output. Keep data on stdout, chatter on
// stderr, so `--format json` stays machine-readable.

#[macro_export]
macro_rules! ui_ok {
    ($($arg:tt)*) => {{
        if !$crate::is_quiet() {
            println!("✔ {}", format!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! ui_info {
    ($($arg:tt)*) => {{
        if !$crate::is_quiet() {
            eprintln!("ℹ {}", format!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! ui_warn {
    ($($arg:tt)*) => {{
        let show_icon = {
            use std::io::IsTerminal;
            std::io::stderr().is_terminal() && std::env::var_os("NO_ICONS").is_none()
        };
        if show_icon {
            eprintln!("⚠ {}", format!($($arg)*));
        } else {
            eprintln!("{}", format!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! ui_err {
    ($($arg:tt)*) => {{
        eprintln!("✖ {}", format!($($arg)*));
    }};
}
