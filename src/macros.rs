//! Macros to reduce boilerplate in the codebase

/// Generate `as_str`, `Display` and `FromStr` for a unit-variant enum whose
/// variants map to fixed wire strings.
///
/// Parsing is case-insensitive. Unknown input is a validation error naming
/// the accepted values.
///
/// # Usage
///
/// ```rust,ignore
/// enum_str!(PollSort, "sort", {
///     Newest => "newest",
///     Oldest => "oldest",
/// });
/// ```
#[macro_export]
macro_rules! enum_str {
    (
        $enum_name:ident,
        $label:expr,
        { $($variant:ident => $str:expr),+ $(,)? }
    ) => {
        impl $enum_name {
            pub const ALL: &'static [$enum_name] = &[$($enum_name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($enum_name::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::AgoraError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok($enum_name::$variant),)+
                    _ => Err($crate::error::AgoraError::Validation(format!(
                        "invalid {} '{}', expected one of: {}",
                        $label,
                        s,
                        [$($str),+].join(", ")
                    ))),
                }
            }
        }
    };
}

#[cfg(test)]
mod test {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestEnum {
        A,
        B,
    }

    crate::enum_str!(TestEnum, "letter", { A => "a", B => "b_b" });

    #[test]
    fn test_display_and_parse() {
        assert_eq!(TestEnum::B.to_string(), "b_b");
        assert_eq!("A".parse::<TestEnum>().unwrap(), TestEnum::A);
        assert_eq!(TestEnum::ALL.len(), 2);
    }

    #[test]
    fn test_parse_error_lists_values() {
        let err = "c".parse::<TestEnum>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation failed: invalid letter 'c', expected one of: a, b_b"
        );
    }
}
