//! Geometry builder: turns decoded entities into [`Geometry`].
//!
//! For one entity handle the builder
//!
//! 1. decodes the object,
//! 2. resolves its color through the layer and color tables,
//! 3. renders its EED records,
//! 4. walks vertex chains for heavy polylines,
//! 5. maps the record onto a geometry variant,
//! 6. collects the attributes of a block reference, when asked to.
//!
//! Entity kinds without a geometry mapping come back as
//! [`Geometry::Unknown`] so a pass over a whole drawing keeps going.

pub mod chain;

use crate::error::Result;
use crate::geometry::*;
use crate::io::dwg::object_type::DwgObjectType;
use crate::io::dwg::reader::object_reader::*;
use crate::io::ByteSource;
use crate::notification::{NotificationCollection, NotificationType};
use crate::tables::LayerTable;
use crate::types::{ColorTable, Handle, Rgb, Vector3, BY_LAYER};

pub use chain::HandleChain;

/// Default bound on chain members
pub const DEFAULT_MAX_CHAIN_LENGTH: usize = 1_000_000;

/// Builds geometry from the objects of one reader.
///
/// Diagnostics go to the reader's notification collection.
pub struct GeometryBuilder<'a, S: ByteSource> {
    reader: &'a mut DwgObjectReader<S>,
    layers: &'a dyn LayerTable,
    colors: &'a dyn ColorTable,
    max_chain_length: usize,
}

impl<'a, S: ByteSource> GeometryBuilder<'a, S> {
    pub fn new(
        reader: &'a mut DwgObjectReader<S>,
        layers: &'a dyn LayerTable,
        colors: &'a dyn ColorTable,
    ) -> Self {
        Self {
            reader,
            layers,
            colors,
            max_chain_length: DEFAULT_MAX_CHAIN_LENGTH,
        }
    }

    pub fn with_max_chain_length(mut self, max_chain_length: usize) -> Self {
        self.max_chain_length = max_chain_length;
        self
    }

    pub fn notifications(&self) -> &NotificationCollection {
        self.reader.notifications()
    }

    /// Build the geometry of the entity `handle`.
    ///
    /// `layer_index` selects the layer used for by-layer colors. A non-null
    /// `block_ref_handle` names an INSERT whose attributes are attached to
    /// the result.
    pub fn get_geometry(
        &mut self,
        layer_index: usize,
        handle: Handle,
        block_ref_handle: Handle,
    ) -> Result<Geometry> {
        let object = self.reader.get_object(handle, false)?;

        let mut common = GeometryCommon::new(object.handle());
        if let Some(entity) = object.entity() {
            common.color = self.resolve_color(layer_index, entity);
            common.eed = self.render_eed(entity);
        }

        let mut geometry = self.build(object, common);

        if !block_ref_handle.is_null() {
            geometry.common_mut().block_attributes =
                self.block_attributes(layer_index, block_ref_handle);
        }

        Ok(geometry)
    }

    // -----------------------------------------------------------------------
    // Color and EED
    // -----------------------------------------------------------------------

    fn resolve_color(&mut self, layer_index: usize, entity: &EntityCommon) -> Option<Rgb> {
        match entity.color_index {
            BY_LAYER => match self.layers.layer(layer_index) {
                Some(layer) => u8::try_from(layer.color())
                    .ok()
                    .map(|index| self.colors.aci_color(index)),
                None => {
                    self.reader.notifications_mut().notify_for(
                        entity.handle,
                        NotificationType::Warning,
                        format!("No layer at index {layer_index} for a by-layer color"),
                    );
                    None
                }
            },
            index @ 0..=255 => Some(self.colors.aci_color(index as u8)),
            _ => None,
        }
    }

    fn render_eed(&mut self, entity: &EntityCommon) -> Vec<String> {
        let encoding = self.reader.encoding();
        let notifications = self.reader.notifications_mut();
        entity
            .eed
            .iter()
            .filter_map(|record| record.render(entity.handle, encoding, notifications))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Mapping
    // -----------------------------------------------------------------------

    fn build(&mut self, object: RawObject, common: GeometryCommon) -> Geometry {
        let object_type = object.object_type();
        match object {
            RawObject::Arc(arc) => Geometry::Arc(Arc {
                common,
                position: arc.center,
                radius: arc.radius,
                thickness: arc.thickness,
                extrusion: arc.extrusion,
                start_angle: arc.start_angle,
                end_angle: arc.end_angle,
            }),
            RawObject::Circle(circle) => Geometry::Circle(Circle {
                common,
                position: circle.center,
                radius: circle.radius,
                thickness: circle.thickness,
                extrusion: circle.extrusion,
            }),
            RawObject::Ellipse(ellipse) => Geometry::Ellipse(Ellipse {
                common,
                position: ellipse.center,
                major_axis: ellipse.major_axis,
                extrusion: ellipse.extrusion,
                axis_ratio: ellipse.axis_ratio,
                start_angle: ellipse.start_angle,
                end_angle: ellipse.end_angle,
            }),
            RawObject::Line(line) => Geometry::Line(Line {
                common,
                start: line.start,
                end: line.end,
                thickness: line.thickness,
                extrusion: line.extrusion,
            }),
            RawObject::Ray(ray) if object_type == DwgObjectType::Xline => {
                Geometry::XLine(XLine {
                    common,
                    position: ray.point,
                    direction: ray.vector,
                })
            }
            RawObject::Ray(ray) => Geometry::Ray(Ray {
                common,
                position: ray.point,
                direction: ray.vector,
            }),
            RawObject::Point(point) => Geometry::Point3D(Point3D {
                common,
                position: point.position,
                extrusion: point.extrusion,
                x_axis_angle: point.x_axis_angle,
                thickness: point.thickness,
            }),
            RawObject::Solid(solid) => Geometry::Solid(Solid {
                common,
                elevation: solid.elevation,
                thickness: solid.thickness,
                corners: solid.corners.map(|c| c.with_z(solid.elevation)),
                extrusion: solid.extrusion,
            }),
            RawObject::Face3D(face) => Geometry::Face3D(Face3D {
                common,
                corners: face.corners,
                invisible_edges: face.invisible_edges,
            }),
            RawObject::Spline(spline) => Geometry::Spline(Spline {
                common,
                scenario: spline.scenario,
                degree: spline.degree,
                rational: spline.rational,
                closed: spline.closed,
                periodic: spline.periodic,
                weighted: spline.weighted,
                fit_tolerance: spline.fit_tolerance,
                begin_tangent: spline.begin_tangent,
                end_tangent: spline.end_tangent,
                knots: spline.knots,
                control_points: spline.control_points,
                control_point_weights: spline.weights,
                fit_points: spline.fit_points,
            }),
            RawObject::Text(text) => Geometry::Text(text_geometry(common, text.text)),
            RawObject::Attribute(attribute) => {
                let attrib = attrib_geometry(common, &attribute);
                match attribute.prompt {
                    Some(prompt) => Geometry::Attdef(Attdef { attrib, prompt }),
                    None => Geometry::Attrib(attrib),
                }
            }
            RawObject::MText(mtext) => Geometry::MText(MText {
                common,
                position: mtext.insertion_point,
                extrusion: mtext.extrusion,
                x_axis_direction: mtext.x_axis_direction,
                height: mtext.height,
                rect_width: mtext.rect_width,
                extents: mtext.extents_height,
                extents_width: mtext.extents_width,
                text: mtext.text,
                attachment: mtext.attachment,
                drawing_direction: mtext.drawing_direction,
            }),
            RawObject::MLine(mline) => Geometry::MLine(MLine {
                common,
                scale: mline.scale,
                opened: mline.open_closed == 1,
                justification: mline.justification,
                extrusion: mline.extrusion,
                vertices: mline.vertices.iter().map(|v| v.position).collect(),
            }),
            RawObject::LwPolyline(lw) => Geometry::LwPolyline(LwPolyline {
                common,
                closed: lw.flags.contains(LwPolylineFlags::CLOSED),
                const_width: lw.const_width,
                elevation: lw.elevation,
                thickness: lw.thickness,
                extrusion: lw.extrusion,
                vertices: lw.points,
                bulges: lw.bulges,
                widths: lw.widths,
            }),
            RawObject::Polyline2D(polyline) => Geometry::Polyline2D(self.polyline_2d(common, polyline)),
            RawObject::Polyline3D(polyline) => Geometry::Polyline3D(self.polyline_3d(common, polyline)),
            RawObject::PolylinePface(polyline) => {
                Geometry::PolylinePFace(self.polyline_pface(common, polyline))
            }
            RawObject::Image(image) => Geometry::Image(self.image(common, image)),
            other => {
                self.reader.notifications_mut().notify_for(
                    other.handle(),
                    NotificationType::NotSupported,
                    format!("No geometry for {:?}", other.object_type()),
                );
                Geometry::Unknown(Unknown {
                    common,
                    object_type,
                })
            }
        }
    }

    // -----------------------------------------------------------------------
    // Chains
    // -----------------------------------------------------------------------

    fn walk(&mut self, owner: Handle, chain: &VertexChain, handles_only: bool) -> Vec<RawObject> {
        HandleChain::new(owner, chain.first_vertex, chain.last_vertex).walk(
            self.reader,
            handles_only,
            self.max_chain_length,
        )
    }

    fn polyline_2d(&mut self, common: GeometryCommon, polyline: Polyline2DObject) -> Polyline2D {
        let mut geometry = Polyline2D {
            common,
            closed: polyline.flags.contains(PolylineFlags::CLOSED),
            splined: polyline.flags.contains(PolylineFlags::SPLINE_FIT),
            start_width: polyline.start_width,
            end_width: polyline.end_width,
            elevation: polyline.elevation,
            thickness: polyline.thickness,
            extrusion: polyline.extrusion,
            ..Default::default()
        };

        for member in self.walk(polyline.common.handle, &polyline.chain, false) {
            let RawObject::Vertex2D(vertex) = member else {
                continue;
            };
            if vertex.flags.is_construction() {
                continue;
            }
            // 2D vertices take their Z from the polyline.
            geometry
                .vertices
                .push(Vector3::new(vertex.point.x, vertex.point.y, polyline.elevation));
            geometry.bulges.push(vertex.bulge);
            geometry.widths.push((vertex.start_width, vertex.end_width));
        }

        geometry
    }

    fn polyline_3d(&mut self, common: GeometryCommon, polyline: Polyline3DObject) -> Polyline3D {
        let vertices = self
            .walk(polyline.common.handle, &polyline.chain, false)
            .into_iter()
            .filter_map(|member| match member {
                RawObject::Vertex(v) if !v.flags.is_construction() => Some(v.point),
                _ => None,
            })
            .collect();

        Polyline3D {
            common,
            closed: polyline.is_closed(),
            splined: polyline.is_splined(),
            vertices,
        }
    }

    fn polyline_pface(
        &mut self,
        common: GeometryCommon,
        polyline: PolylinePfaceObject,
    ) -> PolylinePFace {
        let mut geometry = PolylinePFace {
            common,
            ..Default::default()
        };

        for member in self.walk(polyline.common.handle, &polyline.chain, false) {
            match member {
                RawObject::Vertex(v) if !v.flags.is_construction() => geometry.vertices.push(v.point),
                RawObject::PfaceFace(face) => geometry.faces.push(face.indices),
                _ => {}
            }
        }

        geometry
    }

    // -----------------------------------------------------------------------
    // Images
    // -----------------------------------------------------------------------

    fn image(&mut self, common: GeometryCommon, image: ImageObject) -> Image {
        let mut geometry = Image {
            common,
            insertion_point: image.insertion_point,
            u_vector: image.u_vector,
            v_vector: image.v_vector,
            image_size: image.size,
            show_image: image.display_flags & 0x01 != 0,
            clipping: image.clipping,
            brightness: image.brightness,
            contrast: image.contrast,
            fade: image.fade,
            clip_boundary_type: image.clip_type,
            clipping_points: image.clip_vertices,
            ..Default::default()
        };

        // Wipeouts carry no definition.
        if image.image_def.is_null() {
            return geometry;
        }

        let def_handle = image.image_def.resolve(image.common.handle);
        match self
            .reader
            .get_object(def_handle, false)
            .and_then(RawObject::into_image_def)
        {
            Ok(def) => {
                geometry.file_path = def.file_path;
                geometry.image_size_in_px = def.size_in_pixels;
                geometry.pixel_size = def.pixel_size;
                geometry.resolution_units = ResolutionUnit::from_code(def.resolution_units);
            }
            Err(e) => self.reader.notifications_mut().notify_for(
                image.common.handle,
                NotificationType::Warning,
                format!("Image definition {def_handle:#X} unavailable: {e}"),
            ),
        }

        geometry
    }

    // -----------------------------------------------------------------------
    // Block attributes
    // -----------------------------------------------------------------------

    /// Attribute geometry of the INSERT `block_ref`.
    ///
    /// Links are followed with handles-only decodes; every member is then
    /// built in full and kept when it is an attribute.
    fn block_attributes(&mut self, layer_index: usize, block_ref: Handle) -> Vec<Attrib> {
        let insert = match self
            .reader
            .get_object(block_ref, false)
            .and_then(RawObject::into_insert)
        {
            Ok(insert) => insert,
            Err(e) => {
                self.reader.notifications_mut().notify_for(
                    block_ref,
                    NotificationType::Warning,
                    format!("Block reference unavailable: {e}"),
                );
                return Vec::new();
            }
        };

        let (true, Some(first), Some(last)) = (
            insert.has_attributes,
            insert.first_attribute,
            insert.last_attribute,
        ) else {
            return Vec::new();
        };

        let links = HandleChain::new(insert.common.handle, first, last).walk(
            self.reader,
            true,
            self.max_chain_length,
        );

        let mut attributes = Vec::with_capacity(links.len());
        for link in links {
            match self.get_geometry(layer_index, link.handle(), Handle::NULL) {
                Ok(Geometry::Attrib(attrib)) => attributes.push(attrib),
                Ok(_) => {}
                Err(e) => self.reader.notifications_mut().notify_for(
                    link.handle(),
                    NotificationType::Warning,
                    format!("Attribute failed to build: {e}"),
                ),
            }
        }
        attributes
    }
}

fn text_geometry(common: GeometryCommon, text: TextData) -> Text {
    Text {
        common,
        position: text.insertion_point.with_z(text.elevation),
        alignment_point: text.alignment_point.with_z(text.elevation),
        text: text.value,
        rotation: text.rotation,
        oblique_angle: text.oblique_angle,
        thickness: text.thickness,
        height: text.height,
        elevation: text.elevation,
        width_factor: text.width_factor,
        horizontal_alignment: text.horizontal_alignment,
        vertical_alignment: text.vertical_alignment,
        extrusion: text.extrusion,
    }
}

fn attrib_geometry(common: GeometryCommon, attribute: &AttributeObject) -> Attrib {
    let text = &attribute.text;
    Attrib {
        common,
        position: text.insertion_point.with_z(text.elevation),
        alignment_point: text.alignment_point.with_z(text.elevation),
        extrusion: text.extrusion,
        rotation: text.rotation,
        elevation: text.elevation,
        height: text.height,
        oblique_angle: text.oblique_angle,
        width_factor: text.width_factor,
        thickness: text.thickness,
        position_locked: false,
        tag: attribute.tag.clone(),
        text: text.value.clone(),
        flags: attribute.flags,
    }
}
