//! Object chunk builders.
//!
//! [`EntityChunk`] and [`ObjectChunk`] write the common header of an
//! entity or a non-entity, then the caller's type-specific fields and
//! handles, and frame the result as `MS size | data | RS crc`.
//! The free functions below build the entity kinds the tests use most.

#![allow(dead_code)]

use dwg_geometry::io::dwg::crc::{crc8, OBJECT_CRC_SEED};
use dwg_geometry::io::dwg::DwgObjectType;
use dwg_geometry::types::{Vector2, Vector3};

use super::bit_writer::{ms, BitWriter};

/// Handle code used for stored links (hard pointer, absolute)
pub const LINK: u8 = 4;

/// Frame an object from its data fields (after the RL) and its handles.
pub fn frame(object_type: i16, body: &BitWriter, handles: &BitWriter) -> Vec<u8> {
    let mut type_code = BitWriter::new();
    type_code.bs(object_type);
    let size_in_bits = type_code.bit_len() + 32 + body.bit_len();

    let mut object = BitWriter::new();
    object.bs(object_type).rl(size_in_bits as i32);
    object.append(body).append(handles);
    let object = object.into_bytes();

    let mut chunk = ms(object.len() as u32);
    chunk.extend_from_slice(&object);
    let crc = crc8(OBJECT_CRC_SEED, &chunk);
    chunk.extend_from_slice(&crc.to_le_bytes());
    chunk
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct EntityChunk {
    pub object_type: i16,
    pub handle: u64,
    pub eed: Vec<(u64, Vec<u8>)>,
    /// 0 stores an owner handle; 2 is model space
    pub entity_mode: u8,
    pub owner: u64,
    pub no_links: bool,
    pub prev: (u8, u64),
    pub next: (u8, u64),
    pub color: i16,
    pub layer: u64,
    pub data: BitWriter,
    pub handles: BitWriter,
}

impl EntityChunk {
    pub fn new(object_type: DwgObjectType, handle: u64) -> Self {
        Self::with_raw_type(object_type.as_raw(), handle)
    }

    pub fn with_raw_type(object_type: i16, handle: u64) -> Self {
        Self {
            object_type,
            handle,
            eed: Vec::new(),
            entity_mode: 2,
            owner: 0,
            no_links: true,
            prev: (LINK, 0),
            next: (LINK, 0),
            color: 256,
            layer: 0x10,
            data: BitWriter::new(),
            handles: BitWriter::new(),
        }
    }

    pub fn color(mut self, color: i16) -> Self {
        self.color = color;
        self
    }

    pub fn owner(mut self, owner: u64) -> Self {
        self.entity_mode = 0;
        self.owner = owner;
        self
    }

    /// Store explicit prev/next links (absolute handles).
    pub fn links(mut self, prev: u64, next: u64) -> Self {
        self.no_links = false;
        self.prev = (LINK, prev);
        self.next = (LINK, next);
        self
    }

    /// Store an explicit next link with any handle code.
    pub fn next_ref(mut self, code: u8, value: u64) -> Self {
        self.no_links = false;
        self.next = (code, value);
        self
    }

    pub fn eed(mut self, application: u64, data: Vec<u8>) -> Self {
        self.eed.push((application, data));
        self
    }

    pub fn data(mut self, write: impl FnOnce(&mut BitWriter)) -> Self {
        write(&mut self.data);
        self
    }

    pub fn handles(mut self, write: impl FnOnce(&mut BitWriter)) -> Self {
        write(&mut self.handles);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut body = BitWriter::new();
        body.h(0, self.handle);
        for (application, data) in &self.eed {
            body.bs(data.len() as i16).h(5, *application).bytes(data);
        }
        body.bs(0);
        body.b(false) // no proxy graphics
            .bb(self.entity_mode)
            .bl(0) // reactors
            .b(self.no_links)
            .cmc(self.color)
            .bd(1.0) // linetype scale
            .bb(0) // linetype by layer
            .bb(0) // plot style by layer
            .bs(0) // visible
            .rc(29); // line weight by layer
        body.append(&self.data);

        let mut handles = BitWriter::new();
        if self.entity_mode == 0 {
            handles.h(LINK, self.owner);
        }
        handles.h(3, 0); // xdictionary
        if !self.no_links {
            handles.h(self.prev.0, self.prev.1);
            handles.h(self.next.0, self.next.1);
        }
        handles.h(5, self.layer);
        handles.append(&self.handles);

        frame(self.object_type, &body, &handles)
    }
}

// ---------------------------------------------------------------------------
// Non-entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ObjectChunk {
    pub object_type: i16,
    pub handle: u64,
    pub owner: u64,
    pub data: BitWriter,
    pub handles: BitWriter,
}

impl ObjectChunk {
    pub fn new(object_type: DwgObjectType, handle: u64) -> Self {
        Self::with_raw_type(object_type.as_raw(), handle)
    }

    pub fn with_raw_type(object_type: i16, handle: u64) -> Self {
        Self {
            object_type,
            handle,
            owner: 0,
            data: BitWriter::new(),
            handles: BitWriter::new(),
        }
    }

    pub fn owner(mut self, owner: u64) -> Self {
        self.owner = owner;
        self
    }

    pub fn data(mut self, write: impl FnOnce(&mut BitWriter)) -> Self {
        write(&mut self.data);
        self
    }

    pub fn handles(mut self, write: impl FnOnce(&mut BitWriter)) -> Self {
        write(&mut self.handles);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut body = BitWriter::new();
        body.h(0, self.handle).bs(0).bl(0);
        body.append(&self.data);

        let mut handles = BitWriter::new();
        handles.h(LINK, self.owner).h(3, 0);
        handles.append(&self.handles);

        frame(self.object_type, &body, &handles)
    }
}

// ---------------------------------------------------------------------------
// Common kinds
// ---------------------------------------------------------------------------

pub fn circle(handle: u64, center: Vector3, radius: f64, thickness: f64, extrusion: Vector3) -> EntityChunk {
    EntityChunk::new(DwgObjectType::Circle, handle).data(|w| {
        w.three_bd(center).bd(radius).bt(thickness).be(extrusion);
    })
}

pub fn line(handle: u64, start: Vector3, end: Vector3) -> EntityChunk {
    EntityChunk::new(DwgObjectType::Line, handle).data(|w| {
        let z_is_zero = start.z == 0.0 && end.z == 0.0;
        w.b(z_is_zero)
            .rd(start.x)
            .dd(end.x, start.x)
            .rd(start.y)
            .dd(end.y, start.y);
        if !z_is_zero {
            w.rd(start.z).dd(end.z, start.z);
        }
        w.bt(0.0).be(Vector3::UNIT_Z);
    })
}

pub fn vertex_3d(handle: u64, flags: u8, point: Vector3) -> EntityChunk {
    EntityChunk::new(DwgObjectType::Vertex3D, handle).data(|w| {
        w.rc(flags).three_bd(point);
    })
}

pub fn vertex_2d(handle: u64, flags: u8, point: Vector3, bulge: f64) -> EntityChunk {
    EntityChunk::new(DwgObjectType::Vertex2D, handle).data(|w| {
        w.rc(flags).three_bd(point).bd(0.0).bd(0.0).bd(bulge).bd(0.0);
    })
}

/// POLYLINE_3D with the given first/last/seqend handles (absolute).
pub fn polyline_3d(handle: u64, closed: bool, first: u64, last: u64, seqend: u64) -> EntityChunk {
    EntityChunk::new(DwgObjectType::Polyline3D, handle)
        .data(|w| {
            w.rc(0).rc(if closed { 1 } else { 0 });
        })
        .handles(|h| {
            h.h(LINK, first).h(LINK, last).h(LINK, seqend);
        })
}

pub fn polyline_2d(handle: u64, elevation: f64, first: u64, last: u64, seqend: u64) -> EntityChunk {
    EntityChunk::new(DwgObjectType::Polyline2D, handle)
        .data(|w| {
            w.bs(0) // flags
                .bs(0) // curve type
                .bd(0.0)
                .bd(0.0)
                .bt(0.0)
                .bd(elevation)
                .be(Vector3::UNIT_Z);
        })
        .handles(|h| {
            h.h(LINK, first).h(LINK, last).h(LINK, seqend);
        })
}

pub fn seqend(handle: u64) -> EntityChunk {
    EntityChunk::new(DwgObjectType::Seqend, handle)
}

/// TEXT-style fields with every optional value left at its default.
pub fn write_text_data(w: &mut BitWriter, insertion: Vector2, height: f64, value: &str) {
    w.rc(0xFF).two_rd(insertion).be(Vector3::UNIT_Z).bt(0.0).rd(height).t(value);
}

pub fn attrib(handle: u64, tag: &str, value: &str) -> EntityChunk {
    let (tag, value) = (tag.to_string(), value.to_string());
    EntityChunk::new(DwgObjectType::Attrib, handle)
        .data(move |w| {
            write_text_data(w, Vector2::new(1.0, 2.0), 2.5, &value);
            w.t(&tag).bs(0).rc(0);
        })
        .handles(|h| {
            h.h(5, 0x11); // style
        })
}

/// INSERT at the origin; attribute handles are stored when `attributes` is set.
pub fn insert(handle: u64, block_header: u64, attributes: Option<(u64, u64, u64)>) -> EntityChunk {
    EntityChunk::new(DwgObjectType::Insert, handle)
        .data(|w| {
            w.three_bd(Vector3::ZERO)
                .bb(3) // unit scale
                .bd(0.0)
                .three_bd(Vector3::UNIT_Z)
                .b(attributes.is_some());
        })
        .handles(|h| {
            h.h(5, block_header);
            if let Some((first, last, seqend)) = attributes {
                h.h(LINK, first).h(LINK, last).h(LINK, seqend);
            }
        })
}
