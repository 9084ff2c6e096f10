//! Plain-text table view of address/value pairs.

use crate::address::Address;
use crate::value::Value;

/// Column header printed above every table.
pub const TABLE_HEADER: &str = "Address | Value\n---------------";

/// Format one entry as `address  :  value`.
pub fn render_entry(address: &Address, value: &Value) -> String {
    format!("{address}  :  {value}")
}

/// Render entries under [`TABLE_HEADER`], one per line.
///
/// ```
/// use memsim_core::{render_table, AddressSpace};
///
/// let space = AddressSpace::new(1, 0);
/// assert_eq!(
///     render_table(space.iter()),
///     "Address | Value\n---------------\n0x0000  :  0\n"
/// );
/// ```
pub fn render_table<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a Address, &'a Value)>,
{
    let mut out = String::from(TABLE_HEADER);
    out.push('\n');
    for (address, value) in entries {
        out.push_str(&render_entry(address, value));
        out.push('\n');
    }
    out
}
