use pedidos_core::error::PedidosError;
use pedidos_core::layout::builtin;
use pedidos_core::layout::schema::LayoutConfig;
use std::path::Path;

pub fn list() -> Result<(), PedidosError> {
    println!("Available predefined layouts:\n");
    for name in builtin::PRESETS {
        let layout = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " (default)"
        } else {
            ""
        };
        println!("  {:<8} {}{}", name, layout.name, default_marker);
        if let Some(ref desc) = layout.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(preset: &str) -> Result<(), PedidosError> {
    let json = builtin::preset_json(preset)?;
    let layout = builtin::load_preset(preset)?;
    print!("{}", json);
    if !json.ends_with('\n') {
        println!();
    }
    println!();
    describe(&layout);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), PedidosError> {
    let layout = pedidos_core::layout::load_layout(file)?;

    println!("Layout '{}' is valid.", layout.name);
    describe(&layout);

    Ok(())
}

fn describe(layout: &LayoutConfig) {
    println!(
        "  Products:   blocks starting at x in {} whose text contains /{}/",
        layout.product_band, layout.product_pattern
    );
    println!(
        "  Quantities: blocks starting at x in {} made only of digits",
        layout.quantity_band
    );
    println!(
        "  Rows:       tops less than {} pt apart, matching {}",
        layout.row_tolerance, layout.matching
    );
    println!(
        "  Page label: first number in the first block containing '{}' that has one",
        layout.page_marker
    );
}
