// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Identity schemes for symbolic tie-breaking.
//!
//! Identities only need to be distinct and stable across every query whose
//! answers must agree. Two common layouts are provided.

/// The mesh a vertex index refers to, for queries between two meshes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshSide {
    First,
    Second,
}

/// Identity of vertex `index` when two meshes are queried against each other.
///
/// First-mesh indices are used verbatim; second-mesh indices are offset by
/// the vertex count of the first mesh.
pub fn mesh_pair_identity(side: MeshSide, index: usize, first_mesh_vertex_count: usize) -> usize {
    match side {
        MeshSide::First => index,
        MeshSide::Second => first_mesh_vertex_count + index,
    }
}

/// Identities for a free-standing segment tested against faces of one mesh:
/// the segment endpoints get 0 and 1, the face vertices their mesh index
/// plus 2.
///
/// Reuse the same segment endpoints for every face of a mesh so the answers
/// stay consistent.
pub fn segment_face_identities(face_vertices: [usize; 3]) -> ([usize; 2], [usize; 3]) {
    ([0, 1], face_vertices.map(|i| i + 2))
}
