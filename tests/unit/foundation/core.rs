use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(320, 180).unwrap();
    assert_eq!(c.area(), 57_600);
    assert_eq!(c.to_string(), "320x180");
}

#[test]
fn background_parse_transparent_keyword() {
    assert_eq!(Background::parse("transparent").unwrap(), Background::Transparent);
    assert!(Background::Transparent.is_transparent());
    assert_eq!(Background::parse(" Transparent ").unwrap(), Background::Transparent);
    assert_eq!(Background::Transparent.fill(), Rgba8::transparent());
}

#[test]
fn background_parse_solid_and_invalid() {
    let bg = Background::parse("#000000").unwrap();
    assert_eq!(bg, Background::Solid(Rgba8::rgb(0, 0, 0)));
    assert!(!bg.is_transparent());

    assert!(matches!(
        Background::parse("not-a-color"),
        Err(BadgeloopError::InvalidColor(_))
    ));
}

#[test]
fn default_background_is_white() {
    assert_eq!(Background::default().fill().to_tuple(), (255, 255, 255, 255));
}
