#![allow(clippy::module_name_repetitions)]
//! Docker `-e` argument helpers and env forwarding policy.

use once_cell::sync::Lazy;
use std::env;
use std::ffi::OsString;

/// Prefix for opt-in environment forwarding: `AIFO_FLOW_ENV_<NAME>=<VALUE>`.
pub(crate) const FORWARD_PREFIX: &str = "AIFO_FLOW_ENV_";

// Pass-through environment variables to the flow container
pub(crate) static PASS_ENV_VARS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Timezone
        "TZ",
        // Terminal capabilities for rich output
        "TERM",
    ]
});

pub(crate) fn push_env_if_set(args: &mut Vec<OsString>, key: &str) {
    if env::var(key).ok().is_some_and(|v| !v.is_empty()) {
        args.push(OsString::from("-e"));
        args.push(OsString::from(key));
    }
}

pub(crate) fn push_env_kv(args: &mut Vec<OsString>, key: &str, val: &str) {
    args.push(OsString::from("-e"));
    args.push(OsString::from(format!("{key}={val}")));
}

/// Collect `AIFO_FLOW_ENV_<NAME>=<VALUE>` pairs from `vars`, sorted by name.
///
/// Skips empty values, empty or non `[A-Za-z0-9_]` names, and a small reserved set.
pub(crate) fn prefixed_env_pairs<I>(vars: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (String, String)>,
{
    const RESERVED: &[&str] = &["HOME", "USER", "SHELL", "PATH", "PWD"];

    let mut pairs: Vec<(String, String)> = vars
        .into_iter()
        .filter_map(|(k, v)| {
            let stripped = k.strip_prefix(FORWARD_PREFIX)?;
            if stripped.is_empty() || v.is_empty() {
                return None;
            }
            let valid = stripped
                .bytes()
                .all(|b| matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_'));
            if !valid || RESERVED.contains(&stripped) {
                return None;
            }
            Some((stripped.to_string(), v))
        })
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs
}

/// All `-e` flags for a flow container run.
pub(crate) fn collect_env_flags() -> Vec<OsString> {
    let mut env_flags: Vec<OsString> = Vec::new();
    for var in PASS_ENV_VARS.iter().copied() {
        push_env_if_set(&mut env_flags, var);
    }
    for (k, v) in prefixed_env_pairs(env::vars()) {
        push_env_kv(&mut env_flags, &k, &v);
    }
    env_flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kv(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_prefixed_env_pairs_filters_and_sorts() {
        let pairs = prefixed_env_pairs(vec![
            kv("AIFO_FLOW_ENV_ZED", "z"),
            kv("AIFO_FLOW_ENV_AIRFLOW__CORE__LOAD_EXAMPLES", "False"),
            kv("AIFO_FLOW_ENV_", "empty-name"),
            kv("AIFO_FLOW_ENV_EMPTY", ""),
            kv("AIFO_FLOW_ENV_BAD-NAME", "x"),
            kv("AIFO_FLOW_ENV_PATH", "/evil"),
            kv("UNRELATED", "u"),
        ]);
        assert_eq!(
            pairs,
            vec![
                kv("AIRFLOW__CORE__LOAD_EXAMPLES", "False"),
                kv("ZED", "z"),
            ]
        );
    }

    #[test]
    fn test_push_env_kv_shape() {
        let mut args = Vec::new();
        push_env_kv(&mut args, "A", "b c");
        assert_eq!(args, vec![OsString::from("-e"), OsString::from("A=b c")]);
    }
}
