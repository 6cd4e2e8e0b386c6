#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BigIntError {
    #[error("Syntax error at {method} {file}:{line}: {message}")]
    SyntaxError {
        message: String,
        file: String,
        line: usize,
        method: String,
    },

    #[error("Range error at {method} {file}:{line}: {message}")]
    RangeError {
        message: String,
        file: String,
        line: usize,
        method: String,
    },
}

impl BigIntError {
    /// The message without the source location.
    pub fn message(&self) -> &str {
        match self {
            BigIntError::SyntaxError { message, .. } | BigIntError::RangeError { message, .. } => message,
        }
    }

    /// Message formatted the way a script engine reports the matching exception.
    pub fn user_message(&self) -> String {
        match self {
            BigIntError::SyntaxError { message, .. } => format!("SyntaxError: {message}"),
            BigIntError::RangeError { message, .. } => format!("RangeError: {message}"),
        }
    }
}

impl From<BigIntError> for std::io::Error {
    fn from(err: BigIntError) -> std::io::Error {
        let kind = match err {
            BigIntError::SyntaxError { .. } => std::io::ErrorKind::InvalidData,
            BigIntError::RangeError { .. } => std::io::ErrorKind::InvalidInput,
        };
        std::io::Error::new(kind, err.user_message())
    }
}

// Macros rather than functions so that `file!()` and `line!()` expand at
// the call site.
#[macro_export]
macro_rules! syntax_error_here {
    ($msg:expr) => {
        $crate::BigIntError::SyntaxError {
            message: $msg.to_string(),
            file: file!().to_string(),
            line: line!() as usize,
            method: $crate::function_name!().to_string(),
        }
    };
}

#[macro_export]
macro_rules! range_error_here {
    ($msg:expr) => {
        $crate::BigIntError::RangeError {
            message: $msg.to_string(),
            file: file!().to_string(),
            line: line!() as usize,
            method: $crate::function_name!().to_string(),
        }
    };
}

#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        // remove the trailing "::f"
        &name[..name.len() - 3]
    }};
}
