//! Mesh file output for STL and OBJ.
//!
//! Writers take the mesh as-is: faces are emitted in buffer order and
//! facet normals are derived from each triangle's winding.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::Mesh;
use crate::error::{TerrainError, TerrainResult};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Stl,
    Obj,
}

impl MeshFormat {
    /// Detect format from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .and_then(|ext| match ext.as_str() {
                "stl" => Some(MeshFormat::Stl),
                "obj" => Some(MeshFormat::Obj),
                _ => None,
            })
    }
}

/// Save mesh to file, auto-detecting format from extension.
pub fn save_mesh(mesh: &Mesh, path: &Path) -> TerrainResult<()> {
    let format = MeshFormat::from_path(path).ok_or_else(|| {
        TerrainError::unsupported_format(path.extension().and_then(|e| e.to_str()).map(String::from))
    })?;

    match format {
        MeshFormat::Stl => save_stl(mesh, path),
        MeshFormat::Obj => save_obj(mesh, path),
    }
}

/// Facet normal as stored in STL: unit length, or zero for degenerate faces.
fn facet_normal(mesh: &Mesh, face_idx: usize) -> [f32; 3] {
    mesh.triangle(face_idx)
        .and_then(|t| t.normal())
        .map(|n| [n.x as f32, n.y as f32, n.z as f32])
        .unwrap_or([0.0; 3])
}

fn create(path: &Path) -> TerrainResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| TerrainError::io_write(path, e))?;
    Ok(BufWriter::new(file))
}

/// Save mesh to STL file (binary format).
pub fn save_stl(mesh: &Mesh, path: &Path) -> TerrainResult<()> {
    info!("Saving mesh to {:?}", path);

    let mut writer = create(path)?;

    let triangles: Vec<stl_io::Triangle> = mesh
        .faces
        .iter()
        .enumerate()
        .map(|(face_idx, &[i0, i1, i2])| {
            let v0 = &mesh.vertices[i0 as usize].position;
            let v1 = &mesh.vertices[i1 as usize].position;
            let v2 = &mesh.vertices[i2 as usize].position;

            stl_io::Triangle {
                normal: stl_io::Normal::new(facet_normal(mesh, face_idx)),
                vertices: [
                    stl_io::Vertex::new([v0.x as f32, v0.y as f32, v0.z as f32]),
                    stl_io::Vertex::new([v1.x as f32, v1.y as f32, v1.z as f32]),
                    stl_io::Vertex::new([v2.x as f32, v2.y as f32, v2.z as f32]),
                ],
            }
        })
        .collect();

    stl_io::write_stl(&mut writer, triangles.iter())
        .map_err(|e| TerrainError::io_write(path, e))?;
    writer.flush().map_err(|e| TerrainError::io_write(path, e))?;

    info!("Saved {} triangles to {:?}", mesh.face_count(), path);

    Ok(())
}

/// Save mesh to STL file (ASCII format).
pub fn save_stl_ascii(mesh: &Mesh, path: &Path) -> TerrainResult<()> {
    info!("Saving mesh to {:?} (ASCII STL)", path);

    let mut writer = create(path)?;
    write_stl_ascii(mesh, &mut writer).map_err(|e| TerrainError::io_write(path, e))?;

    info!("Saved {} triangles to {:?}", mesh.face_count(), path);

    Ok(())
}

fn write_stl_ascii(mesh: &Mesh, w: &mut impl Write) -> std::io::Result<()> {
    writeln!(w, "solid terrain")?;
    for (face_idx, face) in mesh.faces.iter().enumerate() {
        let [nx, ny, nz] = facet_normal(mesh, face_idx);
        writeln!(w, "  facet normal {:e} {:e} {:e}", nx, ny, nz)?;
        writeln!(w, "    outer loop")?;
        for &idx in face {
            let p = &mesh.vertices[idx as usize].position;
            writeln!(
                w,
                "      vertex {:e} {:e} {:e}",
                p.x as f32, p.y as f32, p.z as f32
            )?;
        }
        writeln!(w, "    endloop")?;
        writeln!(w, "  endfacet")?;
    }
    writeln!(w, "endsolid terrain")?;
    w.flush()
}

/// Save mesh to OBJ file (indexed, 1-based).
pub fn save_obj(mesh: &Mesh, path: &Path) -> TerrainResult<()> {
    info!("Saving mesh to {:?} (OBJ format)", path);

    let mut writer = create(path)?;
    write_obj(mesh, &mut writer).map_err(|e| TerrainError::io_write(path, e))?;

    debug!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "OBJ written"
    );
    info!("Saved {} triangles to {:?}", mesh.face_count(), path);

    Ok(())
}

fn write_obj(mesh: &Mesh, w: &mut impl Write) -> std::io::Result<()> {
    writeln!(w, "# OBJ file exported by terrain-mesh")?;
    writeln!(w, "# Vertices: {}", mesh.vertices.len())?;
    writeln!(w, "# Faces: {}", mesh.faces.len())?;
    writeln!(w)?;

    for v in &mesh.vertices {
        writeln!(
            w,
            "v {:.6} {:.6} {:.6}",
            v.position.x, v.position.y, v.position.z
        )?;
    }

    writeln!(w)?;

    for &[a, b, c] in &mesh.faces {
        writeln!(w, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }

    w.flush()
}
