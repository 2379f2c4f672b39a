use console::Style;
use plante_core::pipeline::config::PipelineConfig;
use plante_core::report::{area_with_unit, Report};

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

pub fn print_pipeline_summary(config: &PipelineConfig) {
    let s = Styles::new();
    let p = &config.extraction;

    println!();
    println!("  {}", s.title.apply_to("Plante Pipeline"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output_dir.display())
    );
    match (&config.conversion_factor, &config.calibration) {
        (Some(f), _) => println!(
            "  {:<14}{}",
            s.label.apply_to("Factor"),
            s.value.apply_to(f.value())
        ),
        (None, Some(cal)) => println!(
            "  {:<14}{}",
            s.label.apply_to("Factor"),
            s.method
                .apply_to(format!("from 2 points, distance {}", cal.real_distance))
        ),
        (None, None) => println!(
            "  {:<14}{}",
            s.label.apply_to("Factor"),
            s.disabled.apply_to("not set")
        ),
    }
    println!();

    println!("  {}", s.header.apply_to("Extraction"));
    println!(
        "    {:<18}{:?} .. {:?}",
        s.label.apply_to("HSV range"),
        p.color_range.lower,
        p.color_range.upper
    );
    println!(
        "    {:<18}{}",
        s.label.apply_to("Min area"),
        s.value.apply_to(p.min_area)
    );
    println!(
        "    {:<18}{}",
        s.label.apply_to("Dilation kernel"),
        s.value.apply_to(p.dilation_kernel_size)
    );
    println!(
        "    {:<18}{}",
        s.label.apply_to("Max regions"),
        s.value.apply_to(p.max_regions)
    );
    println!(
        "    {:<18}{}x{}",
        s.label.apply_to("Grid"),
        s.value.apply_to(p.grid_rows),
        s.value.apply_to(p.grid_columns)
    );
    println!(
        "    {:<18}{}",
        s.label.apply_to("Labels"),
        s.method.apply_to(&p.label_preset)
    );
    println!();
}

pub fn print_report(report: &Report) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Areas"));
    for line in report.to_lines() {
        println!("    {}", s.value.apply_to(line));
    }
    println!(
        "    {} {}",
        s.label.apply_to("Total:"),
        area_with_unit(report.total_area(), &report.unit)
    );
}
