//! Result assembler: emitted triangles into the flat index buffer.

/// Appends triangles to the caller's buffer in emission order.
pub(crate) struct Assembler<'a> {
    out: &'a mut Vec<u32>,
}

impl<'a> Assembler<'a> {
    pub(crate) fn new(out: &'a mut Vec<u32>) -> Self {
        Self { out }
    }

    #[inline]
    pub(crate) fn emit(&mut self, a: u32, b: u32, c: u32) {
        self.out.extend_from_slice(&[a, b, c]);
    }

    /// Emit unless two corners share a point index; reports whether it did.
    #[inline]
    pub(crate) fn emit_distinct(&mut self, a: u32, b: u32, c: u32) -> bool {
        if a == b || b == c || a == c {
            return false;
        }
        self.emit(a, b, c);
        true
    }

    pub(crate) fn triangles(&self) -> usize {
        self.out.len() / 3
    }
}

/// View a flat index buffer as triangles. A trailing partial triple is ignored.
pub fn triples(indices: &[u32]) -> impl Iterator<Item = [u32; 3]> + '_ {
    indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
}
