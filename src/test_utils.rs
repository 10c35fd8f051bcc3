//! Small meshes shared by the unit tests.

/// One triangular face, no outer face.
pub const TRIANGLE: &str = "3 1\n0 0\n1 0\n0 1\n1 2 3\n";

/// Square split into two triangles, plus the clockwise outer face.
pub const SPLIT_SQUARE: &str = "\
4 3
0 0
4 0
4 4
0 4
1 2 3
1 3 4
1 4 3 2
";

/// Unit square as a DCEL: inner face 1 and outer face 2.
pub const SQUARE_DCEL: &str = "\
4 4 2
0 0 1
1 0 2
1 1 3
0 1 4

1
5

1 5 1 2 4
2 6 1 3 1
3 7 1 4 2
4 8 1 1 3
2 1 2 8 6
3 2 2 5 7
4 3 2 6 8
1 4 2 7 5
";
