use super::traits::{SurfaceParseError, SurfaceParser};
use crate::core::models::mesh::MeshData;
use nalgebra::Point3;
use std::collections::VecDeque;
use std::io::BufRead;
use tracing::info;

// ASCII pmesh layout:
//
//   <vertex count>
//   <x> <y> <z>          (one line per vertex)
//   <polygon count>      (-1 means "read sets until a 0 terminator")
//   <set size>           (then that many vertex indices, one token each)
//   ...
//
// A set size of 1 or 2 (points, edges) is skipped. Size 3 is a triangle.
// Sizes 4 and 5 are closed polygons: the last index repeats the first, giving
// one triangle or a quad split into two. A negative set size means a packed
// color value follows the indices; the color is read and discarded.

/// Parser for the ASCII pmesh polygon format.
pub struct PmeshParser<R: BufRead> {
    reader: R,
    tokens: VecDeque<String>,
    line: usize,
    exhausted: bool,
}

impl<R: BufRead> PmeshParser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            tokens: VecDeque::new(),
            line: 0,
            exhausted: false,
        }
    }

    /// The line number of the most recently consumed token.
    fn here(&self) -> usize {
        self.line
    }

    fn refill(&mut self) -> Result<(), SurfaceParseError> {
        while self.tokens.is_empty() && !self.exhausted {
            let mut buf = String::new();
            if self.reader.read_line(&mut buf)? == 0 {
                self.exhausted = true;
                break;
            }
            self.line += 1;
            let content = buf.trim();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }
            self.tokens
                .extend(content.split_whitespace().map(str::to_string));
        }
        Ok(())
    }

    fn next_token(&mut self) -> Result<String, SurfaceParseError> {
        self.refill()?;
        self.tokens
            .pop_front()
            .ok_or(SurfaceParseError::Truncated { line: self.line })
    }

    fn next_int(&mut self, what: &str) -> Result<i64, SurfaceParseError> {
        let token = self.next_token()?;
        token.parse().map_err(|_| SurfaceParseError::Syntax {
            line: self.here(),
            message: format!("expected integer {what}, found '{token}'"),
        })
    }

    fn next_float(&mut self, what: &str) -> Result<f64, SurfaceParseError> {
        let token = self.next_token()?;
        token.parse().map_err(|_| SurfaceParseError::Syntax {
            line: self.here(),
            message: format!("expected number {what}, found '{token}'"),
        })
    }

    fn next_index(&mut self, vertex_count: usize) -> Result<usize, SurfaceParseError> {
        let raw = self.next_int("vertex index")?;
        if raw < 0 || raw as usize >= vertex_count {
            return Err(SurfaceParseError::IndexOutOfRange {
                line: self.here(),
                index: raw,
                vertex_count,
            });
        }
        Ok(raw as usize)
    }

    fn read_vertices(&mut self) -> Result<Vec<Point3<f64>>, SurfaceParseError> {
        let count = self.next_int("vertex count")?;
        if count <= 0 {
            return Err(SurfaceParseError::Syntax {
                line: self.here(),
                message: format!("vertex count must be positive ({count})"),
            });
        }
        let mut vertices = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let x = self.next_float("x coordinate")?;
            let y = self.next_float("y coordinate")?;
            let z = self.next_float("z coordinate")?;
            vertices.push(Point3::new(x, y, z));
        }
        Ok(vertices)
    }

    fn read_polygons(
        &mut self,
        vertex_count: usize,
    ) -> Result<Vec<[usize; 3]>, SurfaceParseError> {
        let declared = self.next_int("polygon count")?;
        let until_terminator = declared < 0;
        let mut triangles = Vec::new();
        let mut remaining = declared.max(0);

        loop {
            if !until_terminator && remaining == 0 {
                break;
            }
            let set_size = self.next_int("polygon set size")?;
            if until_terminator && set_size == 0 {
                break;
            }
            let has_color = set_size < 0;
            let point_count = set_size.unsigned_abs() as usize;
            if point_count == 0 || point_count > 5 {
                return Err(SurfaceParseError::Syntax {
                    line: self.here(),
                    message: format!("polygon set size must be 1 to 5, found {set_size}"),
                });
            }

            let mut indices = Vec::with_capacity(point_count);
            for _ in 0..point_count {
                indices.push(self.next_index(vertex_count)?);
            }
            if has_color {
                let _color = self.next_int("packed color value")?;
            }
            if point_count > 3 && indices[point_count - 1] != indices[0] {
                return Err(SurfaceParseError::Syntax {
                    line: self.here(),
                    message: format!(
                        "closed polygon must end on its first index ({} != {})",
                        indices[point_count - 1],
                        indices[0]
                    ),
                });
            }

            match point_count {
                3 => triangles.push([indices[0], indices[1], indices[2]]),
                4 => triangles.push([indices[0], indices[1], indices[2]]),
                5 => {
                    triangles.push([indices[0], indices[1], indices[2]]);
                    triangles.push([indices[0], indices[2], indices[3]]);
                }
                _ => {} // points and edges carry no surface
            }
            remaining -= 1;
        }
        Ok(triangles)
    }
}

impl<R: BufRead> SurfaceParser for PmeshParser<R> {
    fn format_name(&self) -> &'static str {
        "pmesh"
    }

    fn parse_surface(&mut self) -> Result<MeshData, SurfaceParseError> {
        let vertices = self.read_vertices()?;
        let triangles = self.read_polygons(vertices.len())?;
        let mesh = MeshData {
            vertices,
            triangles,
        };
        info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "pmesh file parsed"
        );
        Ok(mesh)
    }
}
