//! Geometry building: colors, EED rendering, text and block attributes.

mod common;

use common::*;
use dwg_geometry::geometry::Geometry;
use dwg_geometry::io::dwg::DwgObjectType;
use dwg_geometry::notification::NotificationType;
use dwg_geometry::types::{ColorTable, Rgb, Vector2, Vector3};
use dwg_geometry::{Handle, Layer, LayerCollection};

fn unit_circle(handle: u64) -> EntityChunk {
    circle(handle, Vector3::ZERO, 1.0, 0.0, Vector3::UNIT_Z)
}

fn layers(colors: &[i16]) -> LayerCollection {
    let mut layers = LayerCollection::new();
    for (i, &color) in colors.iter().enumerate() {
        let mut layer = Layer::with_color(format!("L{i}"), color);
        layer.handle = Handle::new(0x10 + i as u64);
        layers.add(layer);
    }
    layers
}

fn color_of(drawing: &TestDrawing, handle: u64, layer_index: usize, table: LayerCollection) -> Option<Rgb> {
    let mut reader = drawing.reader().with_layers(table);
    reader
        .get_geometry(layer_index, Handle::new(handle), Handle::NULL)
        .unwrap()
        .common()
        .color
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

#[test]
fn test_direct_color_index() {
    let mut drawing = TestDrawing::new();
    drawing.add_entity(&unit_circle(0x30).color(3));
    assert_eq!(color_of(&drawing, 0x30, 0, layers(&[])), Some(Rgb::new(0, 255, 0)));
}

#[test]
fn test_by_layer_color_uses_selected_layer() {
    let mut drawing = TestDrawing::new();
    drawing.add_entity(&unit_circle(0x30));

    assert_eq!(color_of(&drawing, 0x30, 0, layers(&[1, 5])), Some(Rgb::new(255, 0, 0)));
    assert_eq!(color_of(&drawing, 0x30, 1, layers(&[1, 5])), Some(Rgb::new(0, 0, 255)));
}

#[test]
fn test_by_layer_color_of_layer_that_is_off() {
    let mut drawing = TestDrawing::new();
    drawing.add_entity(&unit_circle(0x30));
    // A negative index marks the layer off; the color is its magnitude.
    assert_eq!(color_of(&drawing, 0x30, 0, layers(&[-5])), Some(Rgb::new(0, 0, 255)));
}

#[test]
fn test_by_layer_without_layer_warns() {
    let mut drawing = TestDrawing::new();
    drawing.add_entity(&unit_circle(0x30));

    let mut reader = drawing.reader().with_layers(layers(&[1]));
    let geometry = reader.get_geometry(4, Handle::new(0x30), Handle::NULL).unwrap();
    assert_eq!(geometry.common().color, None);

    let warnings = reader.notifications().of_type(NotificationType::Warning);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].handle, Some(Handle::new(0x30)));
}

#[test]
fn test_out_of_range_color_is_unresolved() {
    let mut drawing = TestDrawing::new();
    drawing.add_entity(&unit_circle(0x30).color(300));
    drawing.add_entity(&unit_circle(0x31).color(-2));

    let mut reader = drawing.reader();
    for handle in [0x30, 0x31] {
        let geometry = reader.get_geometry(0, Handle::new(handle), Handle::NULL).unwrap();
        assert_eq!(geometry.common().color, None);
    }
    assert!(reader.notifications().is_empty());
}

#[test]
fn test_custom_color_table() {
    struct Grays;
    impl ColorTable for Grays {
        fn aci_color(&self, index: u8) -> Rgb {
            Rgb::gray(index)
        }
    }

    let mut drawing = TestDrawing::new();
    drawing.add_entity(&unit_circle(0x30).color(42));
    let mut reader = drawing.reader().with_colors(Grays);
    let geometry = reader.get_geometry(0, Handle::new(0x30), Handle::NULL).unwrap();
    assert_eq!(geometry.common().color, Some(Rgb::gray(42)));
}

// ---------------------------------------------------------------------------
// EED
// ---------------------------------------------------------------------------

fn point_item(code: u8, point: [f64; 3]) -> Vec<u8> {
    let mut data = vec![code];
    for v in point {
        data.extend_from_slice(&v.to_le_bytes());
    }
    data
}

#[test]
fn test_eed_records_render_in_order() {
    let mut drawing = TestDrawing::new();
    drawing.add_entity(
        &unit_circle(0x30)
            .color(1)
            .eed(0x12, vec![0, 3, 0, 0, b'A', b'B', b'C'])
            .eed(0x12, point_item(10, [1.0, 2.0, 3.0]))
            .eed(0x13, vec![70, 0x2A, 0x00]),
    );

    let mut reader = drawing.reader();
    let geometry = reader.get_geometry(0, Handle::new(0x30), Handle::NULL).unwrap();
    let eed = &geometry.common().eed;
    assert_eq!(eed.len(), 3);
    assert_eq!(eed[0], "ABC");
    assert!(eed[1].contains("1.000000;2.000000;3.000000"));
    assert_eq!(eed[2], "Short:42");
    assert!(reader.notifications().is_empty());
}

#[test]
fn test_eed_invalid_record_is_dropped_with_warning() {
    let mut drawing = TestDrawing::new();
    drawing.add_entity(
        &unit_circle(0x30)
            .color(1)
            .eed(0x12, vec![1, 0, 0])
            .eed(0x12, vec![99, 0])
            .eed(0x12, vec![40, 0, 0]) // truncated real
            .eed(0x12, vec![2, 1]),
    );

    let mut reader = drawing.reader();
    let geometry = reader.get_geometry(0, Handle::new(0x30), Handle::NULL).unwrap();
    assert_eq!(geometry.common().eed, vec!["}".to_string()]);
    assert_eq!(reader.notifications().of_type(NotificationType::Warning).len(), 3);
}

#[test]
fn test_eed_string_follows_reader_encoding() {
    let mut drawing = TestDrawing::new();
    drawing.add_entity(&unit_circle(0x30).eed(0x12, vec![0, 1, 0, 0, 0xE9]));

    let mut reader = drawing.reader();
    reader.set_encoding(encoding_rs::WINDOWS_1252);
    let geometry = reader.get_geometry(0, Handle::new(0x30), Handle::NULL).unwrap();
    assert_eq!(geometry.common().eed, vec!["é".to_string()]);
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

#[test]
fn test_text_geometry() {
    let mut drawing = TestDrawing::new();
    drawing.add_entity(
        &EntityChunk::new(DwgObjectType::Text, 0x30)
            .data(|w| write_text_data(w, Vector2::new(4.0, 5.0), 3.5, "HELLO"))
            .handles(|h| {
                h.h(5, 0x11);
            }),
    );

    let mut reader = drawing.reader();
    match reader.get_geometry(0, Handle::new(0x30), Handle::NULL).unwrap() {
        Geometry::Text(text) => {
            assert_eq!(text.text, "HELLO");
            assert_eq!(text.position, Vector3::new(4.0, 5.0, 0.0));
            assert_eq!(text.alignment_point, text.position);
            assert_eq!(text.height, 3.5);
            assert_eq!(text.width_factor, 1.0);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_attdef_keeps_prompt() {
    let mut drawing = TestDrawing::new();
    drawing.add_entity(
        &EntityChunk::new(DwgObjectType::Attdef, 0x30)
            .data(|w| {
                write_text_data(w, Vector2::new(0.0, 0.0), 1.0, "DEFAULT");
                w.t("TAG").bs(0).rc(0x08).t("Enter value");
            })
            .handles(|h| {
                h.h(5, 0x11);
            }),
    );

    let mut reader = drawing.reader();
    match reader.get_geometry(0, Handle::new(0x30), Handle::NULL).unwrap() {
        Geometry::Attdef(attdef) => {
            assert_eq!(attdef.prompt, "Enter value");
            assert_eq!(attdef.attrib.tag, "TAG");
            assert_eq!(attdef.attrib.text, "DEFAULT");
            assert_eq!(attdef.attrib.flags, 0x08);
        }
        other => panic!("unexpected {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// Block attributes
// ---------------------------------------------------------------------------

const INSERT: u64 = 0x40;

#[test]
fn test_block_attributes_attach_to_requested_geometry() {
    let mut drawing = TestDrawing::new();
    drawing.add_entity(&insert(INSERT, 0x20, Some((0x41, 0x42, 0x43))));
    drawing.add_entity(&attrib(0x41, "PART", "A-1").color(1));
    drawing.add_entity(&attrib(0x42, "REV", "C"));
    drawing.add_entity(&seqend(0x43));
    drawing.add_entity(&unit_circle(0x30));

    let mut reader = drawing.reader().with_layers(layers(&[5]));
    let geometry = reader
        .get_geometry(0, Handle::new(0x30), Handle::new(INSERT))
        .unwrap();

    let attributes = &geometry.common().block_attributes;
    assert_eq!(attributes.len(), 2);
    assert_eq!(attributes[0].tag, "PART");
    assert_eq!(attributes[0].text, "A-1");
    assert_eq!(attributes[0].common.color, Some(Rgb::new(255, 0, 0)));
    assert_eq!(attributes[1].tag, "REV");
    assert_eq!(attributes[1].common.color, Some(Rgb::new(0, 0, 255)));
    assert_eq!(attributes[1].position, Vector3::new(1.0, 2.0, 0.0));
    assert!(reader.notifications().is_empty());
}

#[test]
fn test_block_attributes_follow_explicit_links() {
    let mut drawing = TestDrawing::new();
    drawing.add_entity(&insert(INSERT, 0x20, Some((0x60, 0x70, 0x71))));
    drawing.add_entity(&attrib(0x60, "FIRST", "1").links(0, 0x70));
    drawing.add_entity(&attrib(0x70, "LAST", "2").links(0x60, 0x71));
    drawing.add_entity(&unit_circle(0x30));

    let mut reader = drawing.reader();
    let geometry = reader
        .get_geometry(0, Handle::new(0x30), Handle::new(INSERT))
        .unwrap();
    let tags: Vec<&str> = geometry
        .common()
        .block_attributes
        .iter()
        .map(|a| a.tag.as_str())
        .collect();
    assert_eq!(tags, vec!["FIRST", "LAST"]);
}

#[test]
fn test_insert_without_attributes() {
    let mut drawing = TestDrawing::new();
    drawing.add_entity(&insert(INSERT, 0x20, None));
    drawing.add_entity(&unit_circle(0x30));

    let mut reader = drawing.reader().with_layers(layers(&[1]));
    let geometry = reader
        .get_geometry(0, Handle::new(0x30), Handle::new(INSERT))
        .unwrap();
    assert!(geometry.common().block_attributes.is_empty());
    assert!(reader.notifications().is_empty());
}

#[test]
fn test_block_reference_that_is_not_an_insert() {
    let mut drawing = TestDrawing::new();
    drawing.add_entity(&unit_circle(0x30).color(1));
    drawing.add_entity(&unit_circle(0x31));

    let mut reader = drawing.reader();
    let geometry = reader
        .get_geometry(0, Handle::new(0x30), Handle::new(0x31))
        .unwrap();
    assert!(matches!(geometry, Geometry::Circle(_)));
    assert!(geometry.common().block_attributes.is_empty());
    let warnings = reader.notifications().of_type(NotificationType::Warning);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("Block reference unavailable"));
}

#[test]
fn test_no_block_reference_leaves_attributes_empty() {
    let mut drawing = TestDrawing::new();
    drawing.add_entity(&insert(INSERT, 0x20, Some((0x41, 0x41, 0x42))));
    drawing.add_entity(&attrib(0x41, "PART", "A-1"));

    let mut reader = drawing.reader();
    match reader.get_geometry(0, Handle::new(INSERT), Handle::NULL).unwrap() {
        Geometry::Unknown(unknown) => {
            assert_eq!(unknown.object_type, DwgObjectType::Insert);
            assert!(unknown.common.block_attributes.is_empty());
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(reader.notifications().has_type(NotificationType::NotSupported));
}
