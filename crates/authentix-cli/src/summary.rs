use std::path::Path;

use authentix_core::config::ImagingConfig;
use authentix_core::geometry::Viewport;
use authentix_core::io::decode::SourceInfo;
use authentix_core::io::encode::EncodedImage;
use console::Style;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
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
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn rule(len: usize) -> String {
    "\u{2550}".repeat(len)
}

pub fn print_crop_summary(
    input: &Path,
    info: &SourceInfo,
    viewport: &Viewport,
    output: &EncodedImage,
    destination: Option<&Path>,
) {
    let s = Styles::new();
    let region = viewport.source_region();
    let (pan_x, pan_y) = viewport.pan();

    println!();
    println!("  {}", s.title.apply_to("Profile Crop"));
    println!("  {}", s.title.apply_to(rule(12)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Source"),
        s.value
            .apply_to(format!("{}x{} {}", info.width, info.height, info.mime))
    );
    println!();

    println!("  {}", s.header.apply_to("Viewport"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Scale"),
        s.value.apply_to(format!("{:.4}", viewport.scale()))
    );
    if viewport.needs_repositioning() {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Pan"),
            s.value.apply_to(format!(
                "{pan_x:.1}/{:.0}, {pan_y:.1}/{:.0}",
                viewport.max_pan_x(),
                viewport.max_pan_y()
            ))
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Pan"),
            s.disabled.apply_to("fixed")
        );
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Window"),
        s.value.apply_to(format!(
            "{:.0}px at ({:.0}, {:.0})",
            region.size, region.x, region.y
        ))
    );
    println!();

    println!("  {}", s.header.apply_to("Output"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Size"),
        s.method
            .apply_to(format!("{}x{} JPEG", output.width, output.height))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Bytes"),
        s.value.apply_to(output.bytes.len())
    );
    match destination {
        Some(path) => println!(
            "    {:<12}{}",
            s.label.apply_to("Saved"),
            s.path.apply_to(path.display())
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Saved"),
            s.disabled.apply_to("stdout")
        ),
    }
    println!();
}

pub fn print_resize_summary(config: &ImagingConfig, encoded: usize, failed: usize) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Listing Photos"));
    println!("  {}", s.title.apply_to(rule(14)));
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Max side"),
        s.value.apply_to(format!("{} px", config.listing_max_side))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Quality"),
        s.value.apply_to(config.jpeg_quality)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Encoded"),
        s.method.apply_to(encoded)
    );
    if failed == 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Failed"),
            s.disabled.apply_to("none")
        );
    } else {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Failed"),
            s.value.apply_to(failed)
        );
    }
    println!();
}
