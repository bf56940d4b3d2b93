//! Raster side of the drawing subsystem: mapping pointer positions into the
//! image's native pixel space and replaying strokes onto a surface.

mod compositor;
mod mapper;

pub use compositor::{composite, paint_stroke, render_asset, RasterSurface};
pub use mapper::CoordinateMapper;

use crate::assets::{AssetError, AssetId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompositeError {
    #[error("image asset {0} is not in the store")]
    AssetNotFound(AssetId),
    #[error("image asset {asset_id} could not be decoded: {source}")]
    Asset {
        asset_id: AssetId,
        #[source]
        source: AssetError,
    },
    #[error("cairo drawing failed: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("cairo surface data is unavailable: {0}")]
    SurfaceData(#[from] cairo::BorrowError),
    #[error("cannot build a {width}x{height} drawing surface")]
    InvalidSurface { width: u32, height: u32 },
}

pub type CompositeResult<T> = std::result::Result<T, CompositeError>;
