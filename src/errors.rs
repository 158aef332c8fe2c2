//! Error types for maze generation, solving and snapshot export.
//!
//! `error_chain!` creates the `Error`, `ErrorKind`, `ResultExt` and `Result` types.
//! Other modules `use crate::errors::*;` to get at them.

use error_chain::error_chain;

use crate::cells::Cartesian2DCoordinate;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Image(::image::ImageError);
    }

    errors {
        InvalidSize(side: usize) {
            description("unsupported maze size")
            display("maze side length {} is outside the supported range", side)
        }
        Unreachable(start: Cartesian2DCoordinate, end: Cartesian2DCoordinate) {
            description("no path between the requested cells")
            display("no path from ({}, {}) to ({}, {})", start.x, start.y, end.x, end.y)
        }
        InvalidCoordinate(coord: Cartesian2DCoordinate) {
            description("coordinate outside of the grid")
            display("coordinate ({}, {}) is outside of the grid", coord.x, coord.y)
        }
        UnknownDifficulty(name: String) {
            description("unknown difficulty")
            display("unknown difficulty '{}', expected easy, tricky or super", name)
        }
    }
}
