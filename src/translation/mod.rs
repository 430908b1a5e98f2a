/*!
 * Translation of protected catalog text.
 *
 * - `gateway`: screening, timeout, rate-limit delay and escape restoration
 *   around a single provider
 */

// Re-export main types for easier usage
pub use self::gateway::{TranslationGateway, screen_text};

// Submodules
pub mod gateway;
