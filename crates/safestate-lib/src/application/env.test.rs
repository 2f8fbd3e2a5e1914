use super::*;

// Built directly rather than from the process environment, so these tests
// stay independent of each other and of the CI runner.
fn env(no_color: Option<&str>, force: Option<&str>, clicolor: Option<&str>) -> EnvironmentConfig {
    EnvironmentConfig {
        no_color: no_color.map(String::from),
        force_color: force.map(String::from),
        clicolor: clicolor.map(String::from),
        ci: None,
    }
}

#[test]
fn test_no_color_disables() {
    let color = env(Some("1"), None, None).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Never);
}

#[test]
fn test_force_color_enables() {
    let color = env(None, Some("1"), None).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Always);
}

#[test]
fn test_force_color_wins_over_everything() {
    let color = env(Some("1"), Some("true"), Some("0")).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Always);
}

#[test]
fn test_clicolor_zero_disables() {
    let color = env(None, None, Some("0")).apply_color_config(ColorIntent::Always);
    assert_eq!(color, ColorIntent::Never);
}

#[test]
fn test_ci_disables_unless_forced() {
    let mut config = env(None, None, None);
    config.ci = Some("true".into());
    assert!(config.is_ci());
    assert_eq!(config.apply_color_config(ColorIntent::Auto), ColorIntent::Never);

    config.force_color = Some("2".into());
    assert_eq!(config.apply_color_config(ColorIntent::Auto), ColorIntent::Always);
}

#[test]
fn test_empty_no_color_is_ignored() {
    let color = env(Some(""), None, None).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Auto);
}

#[test]
fn test_invalid_force_color_values_ignored() {
    let color = env(None, Some("invalid"), None).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Auto);
}

#[test]
fn test_load_reads_process_environment() {
    // Only checks that loading succeeds; values depend on the runner
    assert!(EnvironmentConfig::load().is_ok());
}
