// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests of the tile label pipeline against the fixture
//! shaping engine.

use std::sync::Arc;

use waymark::{FontContext, LabelKind, Point, RuleKey, StyleConfig, TextStyleBuilder};
use waymark_dev::{ADVANCE, DESCENT, FixtureEngine, LINE_HEIGHT, ShapedLog, TestRule, props};

const TILE_SIZE: f32 = 256.0;

fn builder() -> (TextStyleBuilder<FixtureEngine>, ShapedLog) {
    builder_with(StyleConfig::default())
}

fn builder_with(config: StyleConfig) -> (TextStyleBuilder<FixtureEngine>, ShapedLog) {
    let engine = FixtureEngine::new();
    let log = engine.log();
    let fonts = Arc::new(FontContext::new(engine));
    let mut b = TextStyleBuilder::new(fonts, config);
    b.setup(TILE_SIZE);
    (b, log)
}

fn name_rule() -> TestRule {
    TestRule::new()
        .with_str(RuleKey::TextSource, "name")
        .with_f32(RuleKey::FontSize, 12.0)
}

#[test]
fn unresolvable_text_produces_no_labels() {
    let (mut b, log) = builder();
    let rule = name_rule();
    let empty = props(&[]);

    b.add_point(Point::new(1.0, 1.0), &empty, &rule);
    b.add_line(
        &[Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
        &empty,
        &rule,
    );
    b.add_polygon(
        &[vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ]],
        &empty,
        &rule,
    );

    let mesh = b.build();
    assert!(mesh.is_empty());
    assert!(mesh.quads().is_empty());
    assert!(log.entries().is_empty());
}

#[test]
fn build_without_features_is_an_empty_mesh() {
    let (mut b, _log) = builder();
    let mesh = b.build();
    assert!(mesh.is_empty());
    assert!(mesh.quads().is_empty());
}

#[test]
fn point_feature_produces_one_label() {
    let (mut b, log) = builder();
    let properties = props(&[("name", "Main Street")]);

    b.add_point(Point::new(10.0, 20.0), &properties, &name_rule());
    let mesh = b.build();

    assert_eq!(mesh.labels().len(), 1);
    let label = &mesh.labels()[0];
    assert_eq!(label.kind, LabelKind::Point);
    assert_eq!(label.transform.p0, Point::new(10.0, 20.0));
    assert_eq!(label.transform.p1, label.transform.p0);

    // One quad per visible glyph: "Main Street" minus its space.
    assert_eq!(label.quad_range.offset, 0);
    assert_eq!(label.quad_range.len, 10);
    assert_eq!(mesh.quads_for(label.quad_range).len(), 10);
    assert_eq!(label.num_lines, 1);

    assert_eq!(log.last().as_deref(), Some("Main Street"));
}

#[test]
fn uppercase_transform_is_applied_before_shaping() {
    let (mut b, log) = builder();
    let properties = props(&[("name", "Main Street")]);
    let rule = name_rule().with_str(RuleKey::Transform, "uppercase");

    b.add_point(Point::ZERO, &properties, &rule);
    let mesh = b.build();

    assert_eq!(mesh.labels().len(), 1);
    assert_eq!(log.last().as_deref(), Some("MAIN STREET"));
}

#[test]
fn line_feature_labels_each_long_segment() {
    let (mut b, _log) = builder();
    let properties = props(&[("name", "Main Street")]);

    // bbox.x = 11 glyphs * 10px = 110; the minimum segment length is
    // 110 * 2 / 256 * 0.2 ≈ 0.172.
    let line = [
        Point::new(0.0, 0.0),
        Point::new(0.1, 0.0),  // too short
        Point::new(5.0, 0.0),  // long enough
        Point::new(5.0, 0.05), // too short
        Point::new(5.0, 8.0),  // long enough
    ];
    b.add_line(&line, &properties, &name_rule());
    let mesh = b.build();

    assert_eq!(mesh.labels().len(), 2);
    let [first, second] = [&mesh.labels()[0], &mesh.labels()[1]];
    assert_eq!(first.kind, LabelKind::Line);
    assert_eq!(first.transform.p0, Point::new(0.1, 0.0));
    assert_eq!(first.transform.p1, Point::new(5.0, 0.0));
    assert_eq!(second.transform.p0, Point::new(5.0, 0.05));

    // One shaping pass: both placements reuse the same quads and carry
    // the same layout.
    assert_eq!(first.quad_range, second.quad_range);
    assert_eq!(first.bbox, second.bbox);
    assert_eq!(first.num_lines, second.num_lines);
    assert_eq!(mesh.quads().len(), 10);
}

#[test]
fn quad_ranges_grow_disjoint_across_features() {
    let (mut b, _log) = builder();
    let rule = name_rule();

    b.add_point(Point::ZERO, &props(&[("name", "Ab")]), &rule);
    b.add_point(Point::ZERO, &props(&[("name", "Cde")]), &rule);
    let mesh = b.build();

    assert_eq!(mesh.labels().len(), 2);
    let first = mesh.labels()[0].quad_range;
    let second = mesh.labels()[1].quad_range;
    assert_eq!((first.offset, first.len), (0, 2));
    assert_eq!((second.offset, second.len), (2, 3));
    assert_eq!(mesh.quads().len(), 5);
}

#[test]
fn wrapped_point_label_reports_line_count_and_box() {
    let (mut b, _log) = builder();
    let properties = props(&[("name", "aaa bb")]);
    let rule = name_rule().with_f32(RuleKey::TextWrap, 3.0);

    b.add_point(Point::ZERO, &properties, &rule);
    let mesh = b.build();

    assert_eq!(mesh.labels().len(), 1);
    let label = &mesh.labels()[0];
    assert_eq!(label.num_lines, 2);
    assert_eq!(label.quad_range.len, 5);
    assert_eq!(label.bbox.x, 3.0 * ADVANCE);
    assert_eq!(label.bbox.y, 2.0 * LINE_HEIGHT);
    assert_eq!(label.metrics.line_height, LINE_HEIGHT);
    assert_eq!(label.metrics.descender, -DESCENT);
}

#[test]
fn polygon_reduces_to_centroid_point() {
    let (mut b, _log) = builder();
    let properties = props(&[("name", "Park")]);
    let square = vec![vec![
        Point::new(0.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(2.0, 2.0),
        Point::new(0.0, 2.0),
    ]];

    b.add_polygon(&square, &properties, &name_rule());
    let mesh = b.build();

    assert_eq!(mesh.labels().len(), 1);
    let label = &mesh.labels()[0];
    assert_eq!(label.kind, LabelKind::Point);
    assert_eq!(label.transform.p0, Point::new(1.0, 1.0));
}

#[test]
fn stroke_width_is_packed_into_the_style() {
    let (mut b, _log) = builder();
    let properties = props(&[("name", "Main Street")]);
    let rule = name_rule()
        .with_color(RuleKey::FontFill, 0xff11_2233)
        .with_color(RuleKey::FontStrokeColor, 0xffaa_bbcc)
        .with_f32(RuleKey::FontStrokeWidth, 1.5);

    b.add_point(Point::ZERO, &properties, &rule);
    let mesh = b.build();

    let style = mesh.labels()[0].style;
    assert_eq!(style.fill, 0xff11_2233);
    let (color, attrib) = waymark::decode_stroke(style.stroke);
    assert_eq!(color, 0x00aa_bbcc);
    // 1.5px of a 3px maximum.
    assert_eq!(attrib, 127);
    // Atlas size matches the request, so the scale factor is 1.
    assert_eq!(waymark::decode_font_scale(style.font_scale), 1.0);
}

#[test]
fn non_positive_font_size_is_skipped() {
    let (mut b, log) = builder();
    let properties = props(&[("name", "Main Street")]);
    let rule = TestRule::new()
        .with_str(RuleKey::TextSource, "name")
        .with_f32(RuleKey::FontSize, 0.0);

    b.add_point(Point::ZERO, &properties, &rule);
    let mesh = b.build();

    assert!(mesh.is_empty());
    assert!(log.entries().is_empty());
}

#[test]
fn pixel_scale_scales_geometry() {
    let (mut b, _log) = builder_with(StyleConfig {
        pixel_scale: 2.0,
        sdf: true,
    });
    let properties = props(&[("name", "Ab")]);

    b.add_point(Point::ZERO, &properties, &name_rule());
    let mesh = b.build();

    let label = &mesh.labels()[0];
    // Glyph advances double with the pixel scale.
    assert_eq!(label.bbox.x, 2.0 * 2.0 * ADVANCE);
    assert_eq!(label.metrics.line_height, 2.0 * LINE_HEIGHT);
    assert_eq!(waymark::decode_font_scale(label.style.font_scale), 2.0);
}

#[test]
fn builders_share_one_font_context_across_threads() {
    let fonts = Arc::new(FontContext::new(FixtureEngine::new()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let fonts = Arc::clone(&fonts);
            std::thread::spawn(move || {
                let mut b = TextStyleBuilder::new(fonts, StyleConfig::default());
                b.setup(TILE_SIZE);
                let properties = props(&[("name", "Main Street")]);
                for _ in 0..=i {
                    b.add_point(Point::ZERO, &properties, &name_rule());
                }
                b.build()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let mesh = handle.join().expect("builder thread panicked");
        assert_eq!(mesh.labels().len(), i + 1);
        assert_eq!(mesh.quads().len(), 10 * (i + 1));
        // Ingestion order with strictly increasing ranges.
        for (j, label) in mesh.labels().iter().enumerate() {
            assert_eq!(label.quad_range.offset as usize, 10 * j);
        }
    }
}

mod params {
    use super::{FixtureEngine, StyleConfig, TestRule, props};
    use std::sync::Arc;
    use waymark::{Align, Anchor, FontContext, PIXELS_PER_TILE, RuleKey, TextParams};

    fn resolve(rule: &TestRule, properties: &waymark::Properties) -> TextParams {
        let fonts = Arc::new(FontContext::new(FixtureEngine::new()));
        TextParams::from_rule(rule, properties, &fonts, &StyleConfig::default())
    }

    #[test]
    fn repeat_group_is_deterministic_per_rule_and_text() {
        let rule = TestRule::new().with_str(RuleKey::TextSource, "name");
        let properties = props(&[("name", "Main Street")]);

        let a = resolve(&rule, &properties);
        let b = resolve(&rule, &properties);
        assert_eq!(a.options.repeat_group, b.options.repeat_group);

        let c = resolve(&rule, &props(&[("name", "Other Street")]));
        assert_ne!(a.options.repeat_group, c.options.repeat_group);
    }

    #[test]
    fn explicit_repeat_group_overrides_rule_identity() {
        let properties = props(&[("name", "Main Street")]);
        let grouped = TestRule::new()
            .with_str(RuleKey::TextSource, "name")
            .with_str(RuleKey::RepeatGroup, "roads");
        let other = TestRule::new()
            .with_str(RuleKey::TextSource, "name")
            .with_f32(RuleKey::FontSize, 30.0)
            .with_str(RuleKey::RepeatGroup, "roads");

        // Same group and text collapse even when other parameters differ.
        assert_eq!(
            resolve(&grouped, &properties).options.repeat_group,
            resolve(&other, &properties).options.repeat_group
        );
    }

    #[test]
    fn repeat_distance_defaults_to_one_tile() {
        let rule = TestRule::new().with_str(RuleKey::TextSource, "name");
        let properties = props(&[("name", "Main Street")]);
        assert_eq!(
            resolve(&rule, &properties).options.repeat_distance,
            PIXELS_PER_TILE
        );
    }

    #[test]
    fn unparsable_alignment_falls_back_to_anchor() {
        let properties = props(&[("name", "Main Street")]);

        let left = TestRule::new()
            .with_str(RuleKey::TextSource, "name")
            .with_str(RuleKey::Anchor, "left")
            .with_str(RuleKey::Align, "bogus");
        assert_eq!(resolve(&left, &properties).align, Align::Right);

        let right = TestRule::new()
            .with_str(RuleKey::TextSource, "name")
            .with_str(RuleKey::Anchor, "top-right")
            .with_str(RuleKey::Align, "bogus");
        assert_eq!(resolve(&right, &properties).align, Align::Left);

        // Center-column anchors keep the default.
        let top = TestRule::new()
            .with_str(RuleKey::TextSource, "name")
            .with_str(RuleKey::Anchor, "top")
            .with_str(RuleKey::Align, "bogus");
        let resolved = resolve(&top, &properties);
        assert_eq!(resolved.align, Align::Center);
        assert_eq!(resolved.anchor, Anchor::Top);
    }

    #[test]
    fn interactive_rules_attach_properties() {
        let properties = props(&[("name", "Main Street"), ("id", "42")]);
        let rule = TestRule::new()
            .with_str(RuleKey::TextSource, "name")
            .with_bool(RuleKey::Interactive, true);

        let params = resolve(&rule, &properties);
        let attached = params.options.properties.expect("interactive label keeps properties");
        assert_eq!(attached.get_string("id"), "42");

        let plain = TestRule::new().with_str(RuleKey::TextSource, "name");
        assert!(resolve(&plain, &properties).options.properties.is_none());
    }

    #[test]
    fn missing_text_source_falls_back_to_name_property() {
        let rule = TestRule::new();
        let params = resolve(&rule, &props(&[("name", "Fallback")]));
        assert_eq!(params.text, "Fallback");

        let keyed = TestRule::new().with_str(RuleKey::TextSource, "ref");
        let params = resolve(&keyed, &props(&[("name", "X"), ("ref", "A7")]));
        assert_eq!(params.text, "A7");
    }

    #[test]
    fn dynamic_text_source_is_used_verbatim() {
        let rule = TestRule::new()
            .with_str(RuleKey::TextSource, "Computed Label")
            .with_dynamic(RuleKey::TextSource);
        let params = resolve(&rule, &props(&[]));
        assert_eq!(params.text, "Computed Label");
    }

    #[test]
    fn sdf_blur_spread_follows_font_size() {
        let properties = props(&[("name", "Main Street")]);
        let rule = TestRule::new()
            .with_str(RuleKey::TextSource, "name")
            .with_f32(RuleKey::FontSize, 32.0);

        let fonts = Arc::new(FontContext::new(FixtureEngine::new()));
        let sdf = TextParams::from_rule(&rule, &properties, &fonts, &StyleConfig::default());
        assert_eq!(sdf.blur_spread, 32.0 / 16.0 * 5.0);
        assert_eq!(sdf.options.buffer, -16.0);

        let flat = TextParams::from_rule(
            &rule,
            &properties,
            &fonts,
            &StyleConfig {
                pixel_scale: 1.0,
                sdf: false,
            },
        );
        assert_eq!(flat.blur_spread, 0.0);
    }
}
