use std::path::Path;

use console::Style;
use vehicle_mask_core::pipeline::MaskSettings;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    enabled: Style,
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
            enabled: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_mask_summary(input: &Path, output: &Path, settings: &MaskSettings) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Vehicle Mask"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(12)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!();

    // Edges and shaping
    let (low, high) = settings.edge_thresholds();
    println!("  {}", s.header.apply_to("Edges"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Thresholds"),
        s.value.apply_to(format!("{low} / {high}"))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Kernel"),
        s.value.apply_to(format!("{0}x{0} ellipse", settings.effective_kernel_size()))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Dilate"),
        s.value.apply_to(settings.dilate_passes())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Erode"),
        s.value.apply_to(settings.erode_passes())
    );
    println!();

    println!("  {}", s.header.apply_to("Options"));
    let white = if !settings.white_cycle_mode {
        s.disabled.apply_to("off".to_string())
    } else if let Some(thr) = settings.explicit_white_threshold() {
        s.enabled.apply_to(format!("below {thr}"))
    } else {
        s.enabled.apply_to("auto".to_string())
    };
    println!("    {:<12}{}", s.label.apply_to("White cycle"), white);
    print_optional(&s, "Min area", settings.area_filter().map(|a| format!("{a} px")));
    print_optional(
        &s,
        "Feather",
        settings.feather_kernel().map(|k| format!("{k}x{k} gaussian")),
    );
    print_optional(&s, "Invert", settings.invert.then(|| "yes".to_string()));
    println!();
}

fn print_optional(s: &Styles, label: &str, value: Option<String>) {
    match value {
        Some(v) => println!("    {:<12}{}", s.label.apply_to(label), s.enabled.apply_to(v)),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to(label),
            s.disabled.apply_to("off")
        ),
    }
}
