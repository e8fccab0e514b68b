use super::*;

fn book() -> FontBook {
    FontBook::new()
        .with_font("Inter", vec![1, 2, 3])
        .unwrap()
        .with_font("IBM Plex Mono", vec![4])
        .unwrap()
}

#[test]
fn insert_validates_inputs() {
    let mut fonts = FontBook::new();
    assert!(fonts.insert("  ", vec![1]).is_err());
    assert!(fonts.insert("Inter", Vec::new()).is_err());
    fonts.insert(" Inter ", vec![1]).unwrap();
    assert!(fonts.contains("inter"));
    assert_eq!(fonts.families(), vec!["Inter"]);
}

#[test]
fn resolve_prefers_requested_then_defaults_then_any() {
    let fonts = book();
    let (name, _) = fonts.resolve(&["inter".to_owned()]).unwrap();
    assert_eq!(name, "Inter");

    let (name, bytes) = fonts.resolve(&["Missing".to_owned()]).unwrap();
    assert_eq!(name, "IBM Plex Mono");
    assert_eq!(bytes.as_slice(), &[4]);

    let only = FontBook::new().with_font("Lora", vec![7]).unwrap();
    assert_eq!(only.resolve(&[]).unwrap().0, "Lora");
    assert!(FontBook::new().resolve(&["Inter".to_owned()]).is_none());
}

#[test]
fn layout_rejects_bad_sizes() {
    let mut engine = TextLayoutEngine::new();
    let brush = TextBrushRgba8::default();
    let result = engine.layout_line("Inter", &[1, 2, 3], "x", 0.0, 400.0, brush);
    assert!(matches!(result, Err(PosterError::Validation(_))));
}

#[test]
fn candidates_list_every_face_once_in_resolution_order() {
    let fonts = book().with_font("Lora", vec![7]).unwrap();
    let names: Vec<&str> = fonts
        .candidates(&["lora".to_owned(), "Inter".to_owned()])
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["Lora", "Inter", "IBM Plex Mono"]);
}

#[test]
fn unparsable_font_bytes_are_rejected_and_remembered() {
    let mut engine = TextLayoutEngine::new();
    let broken = vec![0u8; 64];
    assert!(matches!(
        engine.family_name("Broken", &broken),
        Err(PosterError::Validation(_))
    ));
    assert!(engine.rejected.contains("Broken"));
    assert!(engine.family_name("Broken", &broken).is_err());

    let dejavu = std::fs::read("tests/data/fonts/DejaVuSans.ttf").unwrap();
    assert_eq!(engine.family_name("Body", &dejavu).unwrap(), "DejaVu Sans");
}
