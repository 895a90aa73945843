//! Information about this project.

/// The formal name of this product.
pub const PRODUCT_NAME: &str = "reef";

/// The URI to display as the product's homepage.
pub const PRODUCT_DISPLAY_URI: &str = env!("CARGO_PKG_REPOSITORY");

/// The version of the product, in string form.
pub const PRODUCT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) fn get_product_display_str() -> String {
    std::format!("{PRODUCT_NAME} version {PRODUCT_VERSION} - {PRODUCT_DISPLAY_URI}")
}
