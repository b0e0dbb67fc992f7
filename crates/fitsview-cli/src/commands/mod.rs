pub mod bounds;
pub mod config;
pub mod crop;
pub mod header;
pub mod info;
pub mod render;

use anyhow::Result;
use clap::Args;
use fitsview_core::normalize::{NormalizationState, ScaleMode};

/// Normalization overrides shared by `bounds` and `render`.
#[derive(Args)]
pub struct NormArgs {
    /// Scale mode (linear or log)
    #[arg(long)]
    pub mode: Option<ScaleMode>,

    /// Lower percentile (0-100)
    #[arg(long)]
    pub vmin: Option<f64>,

    /// Upper percentile (0-100)
    #[arg(long)]
    pub vmax: Option<f64>,
}

impl NormArgs {
    /// Apply the overrides on top of `base` and validate the result.
    pub fn resolve(&self, base: &NormalizationState) -> Result<NormalizationState> {
        let state = NormalizationState {
            mode: self.mode.unwrap_or(base.mode),
            vmin_percentile: self.vmin.unwrap_or(base.vmin_percentile),
            vmax_percentile: self.vmax.unwrap_or(base.vmax_percentile),
        };
        state.validate()?;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_overrides_only_given_fields() {
        let args = NormArgs {
            mode: Some(ScaleMode::Log),
            vmin: None,
            vmax: Some(99.0),
        };
        let state = args.resolve(&NormalizationState::default()).unwrap();
        assert_eq!(state.mode, ScaleMode::Log);
        assert_eq!(state.vmin_percentile, 5.0);
        assert_eq!(state.vmax_percentile, 99.0);
    }

    #[test]
    fn test_resolve_rejects_out_of_range() {
        let args = NormArgs {
            mode: None,
            vmin: Some(-2.0),
            vmax: None,
        };
        assert!(args.resolve(&NormalizationState::default()).is_err());
    }
}
