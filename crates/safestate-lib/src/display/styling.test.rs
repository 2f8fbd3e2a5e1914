use super::*;

#[test]
fn test_plain_styles_are_identity() {
    let styles = StyleManager::plain();
    assert!(!styles.colors_enabled());
    assert_eq!(styles.style_success("SAFE"), "SAFE");
    assert_eq!(styles.style_emphasis("x"), "x");
    assert_eq!(styles.format_success("P0"), "✓ P0");
    assert_eq!(styles.format_error("P1"), "✗ P1");
}

#[test]
fn test_forced_colors_emit_ansi() {
    let styles = StyleManager::with_colors(true);
    let styled = styles.style_error("UNSAFE");
    assert!(styled.contains("\u{1b}["));
    assert_eq!(console::strip_ansi_codes(&styled), "UNSAFE");
}

#[test]
fn test_chain_joins_with_arrows() {
    let styles = StyleManager::plain();
    let names = vec!["P1".to_string(), "P2".to_string(), "P0".to_string()];
    assert_eq!(styles.chain(&names), "P1 -> P2 -> P0");
    assert_eq!(styles.chain(&[]), "");
}
