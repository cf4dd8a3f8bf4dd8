pub use self::{cell::*, color::*, piece::*, points::*, pool::*, seed::*, streak::*};

pub(crate) mod cell;
pub(crate) mod color;
pub(crate) mod piece;
pub(crate) mod points;
pub(crate) mod pool;
pub(crate) mod seed;
pub(crate) mod streak;
