use pedidos_core::error::PedidosError;
use pedidos_core::model::IndexedRow;

pub fn print(rows: &[IndexedRow]) -> Result<(), PedidosError> {
    let json = serde_json::to_string_pretty(rows)?;
    println!("{json}");
    Ok(())
}
