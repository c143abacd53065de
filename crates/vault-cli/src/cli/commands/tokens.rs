//! Token export.

use vault_core::tokens;

pub fn export(css: bool) {
    if css {
        print!("{}", tokens::CUSTOM_CSS);
    } else {
        println!("{}", tokens::tailwind_config_pretty());
    }
}
