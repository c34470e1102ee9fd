//! Route tree.
//!
//! ```text
//! /health                    service health
//! /status                    per-job run status
//! /Genre                     movie + TV genre sync
//! /Films                     next movie page
//! /TvShows                   next TV show page
//! /FilmRecommendations       next movie recommendation page
//! /TvShowsRecommendations    next TV recommendation page
//! /Configurations            provider configuration
//! ```

pub mod health;
pub mod status;
pub mod sync;
