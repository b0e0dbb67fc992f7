use std::path::Path;

use console::Style;
use fitsview_core::image::{FitsImage, SourceInfo};
use fitsview_core::metadata::{CleanBeam, Frequency, PixelScale};
use fitsview_core::normalize::{NormBounds, NormalizationState};
use fitsview_core::roi::Roi;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(title.chars().count())));
    println!();
}

/// Print a metadata report, dimmed when the keywords are absent.
fn print_report(s: &Styles, available: bool, text: impl std::fmt::Display) {
    if available {
        println!("    {}", s.value.apply_to(text));
    } else {
        println!("    {}", s.disabled.apply_to(text));
    }
}

pub fn print_info_summary(
    info: &SourceInfo,
    cards: usize,
    frequency: &Frequency,
    beam: &CleanBeam,
    scale: &PixelScale,
) {
    let s = Styles::new();
    print_title(&s, "FITS Image");

    println!(
        "  {:<14}{}",
        s.label.apply_to("File"),
        s.path.apply_to(info.filename.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Dimensions"),
        s.value.apply_to(format!("{}x{}", info.width, info.height))
    );
    if info.header_axes.len() > 2 {
        println!(
            "  {:<14}{:?}",
            s.label.apply_to("Header axes"),
            info.header_axes
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("BITPIX"),
        s.value.apply_to(info.bitpix.code())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Cards"),
        s.value.apply_to(cards)
    );
    if let Some(ref obj) = info.object {
        println!("  {:<14}{}", s.label.apply_to("Object"), s.value.apply_to(obj));
    }
    if let Some(ref tel) = info.telescope {
        println!("  {:<14}{}", s.label.apply_to("Telescope"), s.value.apply_to(tel));
    }
    println!();

    println!("  {}", s.header.apply_to("Metadata"));
    print_report(&s, frequency.0.is_some(), frequency);
    print_report(&s, beam.0.is_some(), beam);
    print_report(&s, scale.0.is_some(), scale);
    println!();
}

pub fn print_bounds_summary(state: &NormalizationState, bounds: &NormBounds) {
    let s = Styles::new();
    print_title(&s, "Normalization");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Mode"),
        s.value.apply_to(state.mode)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Percentiles"),
        s.value.apply_to(format!(
            "{} .. {}",
            state.vmin_percentile, state.vmax_percentile
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Low"),
        s.value.apply_to(bounds.low)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("High"),
        s.value.apply_to(bounds.high)
    );
    println!();
}

pub fn print_crop_summary(roi: &Roi, source: &FitsImage, cropped: &FitsImage, output: &Path) {
    let s = Styles::new();
    print_title(&s, "ROI Export");

    println!("  {:<14}{}", s.label.apply_to("ROI"), s.value.apply_to(roi));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Source"),
        s.value.apply_to(format!("{}x{}", source.width(), source.height()))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Cropped"),
        s.value.apply_to(format!("{}x{}", cropped.width(), cropped.height()))
    );
    println!();
    println!("ROI saved as {}", s.path.apply_to(output.display()));
}
