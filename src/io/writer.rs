use crate::error::Result;
use crate::mesh::dcel::DCEL;
use std::io::Write;

/// Writes a DCEL in the text format read by [`crate::io::read_dcel`].
pub fn write_dcel<W: Write>(dcel: &DCEL, mut out: W) -> Result<()> {
    writeln!(
        out,
        "{} {} {}",
        dcel.vertices().len(),
        dcel.edge_pair_count(),
        dcel.faces().len()
    )?;

    for v in dcel.vertices() {
        let edge = v.edge.map_or(0, |e| e.number());
        writeln!(out, "{} {} {}", v.pos.x, v.pos.y, edge)?;
    }
    for f in dcel.faces() {
        writeln!(out, "{}", f.edge)?;
    }
    for he in dcel.half_edges() {
        writeln!(
            out,
            "{} {} {} {} {}",
            he.origin, he.twin, he.face, he.next, he.prev
        )?;
    }

    out.flush()?;
    Ok(())
}

pub fn dcel_to_string(dcel: &DCEL) -> Result<String> {
    let mut buf = Vec::new();
    write_dcel(dcel, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
