use std::{env, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

// ENV が未設定または不正な値のときは、ビルドプロファイルから既定値を決める
pub fn which() -> Environment {
    #[cfg(debug_assertions)]
    let default_env = Environment::Development;
    #[cfg(not(debug_assertions))]
    let default_env = Environment::Production;

    env::var("ENV")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default_env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("development", Environment::Development)]
    #[case("DEV", Environment::Development)]
    #[case("production", Environment::Production)]
    #[case("Prod", Environment::Production)]
    fn parse_environment_name(#[case] raw: &str, #[case] expected: Environment) {
        assert_eq!(raw.parse::<Environment>(), Ok(expected));
    }

    #[test]
    fn reject_unknown_environment_name() {
        assert!("staging".parse::<Environment>().is_err());
    }
}
