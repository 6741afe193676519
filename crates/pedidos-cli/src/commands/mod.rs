pub mod blocks;
pub mod extract;
pub mod layout;

use pedidos_core::error::PedidosError;
use pedidos_core::layout::{builtin, load_layout, Layout};
use std::path::Path;

/// Pick the layout from `--layout`, else `--preset`, else the default preset.
pub fn resolve_layout(
    preset: Option<&str>,
    layout_file: Option<&Path>,
) -> Result<Layout, PedidosError> {
    let config = match (layout_file, preset) {
        (Some(path), _) => load_layout(path)?,
        (None, Some(name)) => builtin::load_preset(name)?,
        (None, None) => builtin::load_preset(builtin::DEFAULT_PRESET)?,
    };
    Layout::compile(config)
}
