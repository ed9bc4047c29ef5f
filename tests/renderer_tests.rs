use std::fs;
use std::path::PathBuf;
use image::ColorType;
use vibration_icons::color::Color;
use vibration_icons::config::{Config, IconStyle, OutputConfig, Preset};
use vibration_icons::driver::draw_icons;
use vibration_icons::renderer::IconRenderer;

fn pixel(img: &image::RgbImage, x: u32, y: u32) -> Color {
    Color::from_rgb(*img.get_pixel(x, y))
}

fn output_in(dir: &std::path::Path) -> OutputConfig {
    OutputConfig {
        directory: dir.to_path_buf(),
        ..OutputConfig::default()
    }
}

#[test]
fn test_render_dimensions_match_size() {
    for preset in [Preset::Phone, Preset::Gradient, Preset::Circle] {
        let renderer = IconRenderer::new(IconStyle::preset(preset));
        for size in [1, 16, 48, 192, 333, 512] {
            let img = renderer.render(size).unwrap();
            assert_eq!(img.width(), size, "{:?} at {}", preset, size);
            assert_eq!(img.height(), size, "{:?} at {}", preset, size);
        }
    }
}

#[test]
fn test_gradient_starts_at_start_color() {
    let style = IconStyle::preset(Preset::Gradient);
    let img = IconRenderer::new(style.clone()).render(192).unwrap();

    assert_eq!(pixel(&img, 0, 0), style.palette.gradient_start);
    assert_eq!(pixel(&img, 191, 0), style.palette.gradient_start);
}

#[test]
fn test_gradient_bottom_row_approaches_end_color() {
    let style = IconStyle::preset(Preset::Gradient);
    let start = style.palette.gradient_start;
    let end = style.palette.gradient_end;

    for size in [192u32, 512] {
        let img = IconRenderer::new(style.clone()).render(size).unwrap();
        let bottom = pixel(&img, 0, size - 1);

        // One row's worth of change plus truncation
        let close = |a: u8, b: u8, s: u8| {
            let step = (a as i32 - s as i32).unsigned_abs() / size + 1;
            (a as i32 - b as i32).unsigned_abs() <= step
        };
        assert!(close(end.r, bottom.r, start.r), "red {} vs {}", bottom.r, end.r);
        assert!(close(end.g, bottom.g, start.g), "green {} vs {}", bottom.g, end.g);
        assert!(close(end.b, bottom.b, start.b), "blue {} vs {}", bottom.b, end.b);
    }
}

#[test]
fn test_gradient_rows_are_monotonic() {
    let style = IconStyle::preset(Preset::Gradient);
    let img = IconRenderer::new(style).render(192).unwrap();

    // Column 0 is never touched by the motif or the waves
    let column: Vec<Color> = (0..192).map(|y| pixel(&img, 0, y)).collect();
    for pair in column.windows(2) {
        assert!(pair[1].r >= pair[0].r);
        assert!(pair[1].g >= pair[0].g);
        assert!(pair[1].b >= pair[0].b);
    }
}

#[test]
fn test_flat_variants_keep_background_corners() {
    for preset in [Preset::Phone, Preset::Circle] {
        let style = IconStyle::preset(preset);
        let img = IconRenderer::new(style.clone()).render(192).unwrap();
        for (x, y) in [(0, 0), (191, 0), (0, 191), (191, 191)] {
            assert_eq!(pixel(&img, x, y), style.palette.background);
        }
    }
}

#[test]
fn test_render_192_writes_rgb_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("icon-192.png");

    IconRenderer::new(IconStyle::default())
        .render_to_file(192, &path)
        .unwrap();

    assert!(path.exists());
    assert!(fs::metadata(&path).unwrap().len() > 0);

    let decoded = image::open(&path).unwrap();
    assert_eq!(decoded.width(), 192);
    assert_eq!(decoded.height(), 192);
    assert_eq!(decoded.color(), ColorType::Rgb8);
}

#[test]
fn test_rendering_twice_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.png");
    let second = dir.path().join("second.png");

    let renderer = IconRenderer::new(IconStyle::preset(Preset::Gradient));
    renderer.render_to_file(512, &first).unwrap();
    renderer.render_to_file(512, &second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_existing_file_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("icon-192.png");
    fs::write(&path, b"stale").unwrap();

    IconRenderer::new(IconStyle::default())
        .render_to_file(192, &path)
        .unwrap();

    assert_eq!(image::open(&path).unwrap().width(), 192);
}

#[test]
fn test_unwritable_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("icon-192.png");

    let result = IconRenderer::new(IconStyle::default()).render_to_file(192, &path);
    assert!(result.is_err());
}

#[test]
fn test_draw_icons_writes_every_default_size() {
    let dir = tempfile::tempdir().unwrap();
    let output = output_in(dir.path());

    let written = draw_icons(&IconRenderer::new(IconStyle::default()), &output).unwrap();

    let expected: Vec<PathBuf> = vec![
        dir.path().join("icon-192.png"),
        dir.path().join("icon-512.png"),
    ];
    assert_eq!(written, expected);
    for (path, size) in expected.iter().zip([192, 512]) {
        let decoded = image::open(path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (size, size));
    }
}

#[test]
fn test_draw_icons_creates_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("public").join("icons");
    let output = OutputConfig {
        sizes: vec![48],
        ..output_in(&nested)
    };

    draw_icons(&IconRenderer::new(IconStyle::default()), &output).unwrap();
    assert!(nested.join("icon-48.png").exists());
}

#[test]
fn test_style_from_yaml_drives_the_renderer() {
    let yaml = r##"
style:
  motif: circle
  palette:
    background: "#000000"
"##;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    config.validate().unwrap();

    let img = IconRenderer::new(config.style).render(64).unwrap();
    assert_eq!(pixel(&img, 0, 0), Color::new(0, 0, 0));
    assert_eq!(pixel(&img, 32, 32), Color::new(0, 0, 0));
}
