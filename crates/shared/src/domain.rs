use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownChoice;

macro_rules! closed_choice {
    ($name:ident, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownChoice;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let trimmed = raw.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| UnknownChoice::new($kind, raw))
            }
        }
    };
}

closed_choice!(Product, "product", [Rice, Wheat, Corn, Soybeans, Potatoes]);
closed_choice!(Season, "season", [Spring, Summer, Fall, Winter]);
