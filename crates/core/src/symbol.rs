//! Scannable symbol encoding.
//!
//! Two independent encodings per product: a linear barcode of the bare
//! identifier (symbology chosen by [`GtinFamily`]) and a QR matrix
//! symbol of the full canonical link, so any generic scanner resolves
//! straight to the product page. Both encodings are deterministic --
//! the same input always yields byte-identical output.

use barcoders::generators::svg::SVG;
use barcoders::sym::code128::Code128;
use barcoders::sym::ean13::EAN13;
use barcoders::sym::ean8::EAN8;
use qrcode::render::svg;
use qrcode::QrCode;

use crate::error::CoreError;
use crate::gtin::{GtinFamily, GTIN_FORMAT_MESSAGE};

/// Bar module width in pixels for linear SVG output.
const BAR_WIDTH_PX: u32 = 2;

/// Bar height in pixels for linear SVG output.
const BAR_HEIGHT_PX: u32 = 80;

/// Target edge size in pixels for the QR symbol (quiet zone included).
const QR_TARGET_PX: u32 = 256;

/// Code 128 character-set C selector (digit pairs).
const CODE128_SET_C: char = 'Ć';

/// Encoding failure, reported distinctly from "no identifier provided".
#[derive(Debug, thiserror::Error)]
pub enum SymbolError {
    #[error("no identifier provided")]
    EmptyInput,

    #[error("cannot encode {value:?} as {symbology}: {reason}")]
    Unencodable {
        value: String,
        symbology: &'static str,
        reason: String,
    },
}

impl From<SymbolError> for CoreError {
    fn from(err: SymbolError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

/// A rendered linear barcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearSymbol {
    /// Chosen symbology family.
    pub symbology: GtinFamily,
    /// Raw module pattern (one entry per module, 1 = bar, 0 = space).
    pub modules: Vec<u8>,
    /// Deterministic SVG rendering of the module pattern.
    pub svg: String,
}

/// A rendered QR matrix symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixSymbol {
    /// The exact text the symbol decodes to (the canonical link).
    pub payload: String,
    /// Symbol width in modules, quiet zone excluded.
    pub width: usize,
    /// Deterministic SVG rendering at the fixed target size.
    pub svg: String,
}

/// Encode a GTIN as a linear barcode.
///
/// Symbology is selected by [`GtinFamily`]: 8 digits -> EAN-8, 13 ->
/// EAN-13, 12 or 14 -> Code 128 (character set C). The EAN symbologies
/// re-derive the final digit from the data digits, so they only accept
/// input whose supplied final digit already is the standard modulo-10
/// check digit; anything else would render a symbol that scans back as
/// a different identifier.
pub fn encode_linear(gtin: &str) -> Result<LinearSymbol, SymbolError> {
    if gtin.is_empty() {
        return Err(SymbolError::EmptyInput);
    }
    let family = GtinFamily::for_gtin(gtin).map_err(|_| SymbolError::Unencodable {
        value: gtin.to_string(),
        symbology: "linear barcode",
        reason: GTIN_FORMAT_MESSAGE.to_string(),
    })?;

    let modules = match family {
        // barcoders takes the data digits and appends the check digit
        // itself, so verify the supplied one first and hand it
        // everything but the final digit.
        GtinFamily::Ean8 => {
            verify_ean_check_digit(gtin, family)?;
            EAN8::new(&gtin[..7])
                .map_err(|e| unencodable(gtin, family, e))?
                .encode()
        }
        GtinFamily::Ean13 => {
            verify_ean_check_digit(gtin, family)?;
            EAN13::new(&gtin[..12])
                .map_err(|e| unencodable(gtin, family, e))?
                .encode()
        }
        GtinFamily::Code128 => Code128::new(format!("{CODE128_SET_C}{gtin}"))
            .map_err(|e| unencodable(gtin, family, e))?
            .encode(),
    };

    let mut renderer = SVG::new(BAR_HEIGHT_PX);
    renderer.xdim = BAR_WIDTH_PX;
    let svg = renderer
        .generate(&modules)
        .map_err(|e| unencodable(gtin, family, e))?;

    Ok(LinearSymbol {
        symbology: family,
        modules,
        svg,
    })
}

/// Encode a canonical link as a QR matrix symbol.
///
/// The full link is encoded (never the bare identifier) at a fixed
/// target size with the standard quiet zone.
pub fn encode_matrix(link: &str) -> Result<MatrixSymbol, SymbolError> {
    if link.is_empty() {
        return Err(SymbolError::EmptyInput);
    }

    let code = QrCode::new(link.as_bytes()).map_err(|e| SymbolError::Unencodable {
        value: link.to_string(),
        symbology: "QR",
        reason: e.to_string(),
    })?;

    let svg = code
        .render::<svg::Color>()
        .min_dimensions(QR_TARGET_PX, QR_TARGET_PX)
        .quiet_zone(true)
        .build();

    Ok(MatrixSymbol {
        payload: link.to_string(),
        width: code.width(),
        svg,
    })
}

/// Standard GS1 modulo-10 check digit over the data digits.
fn ean_check_digit(data: &str) -> u8 {
    let sum: u32 = data
        .bytes()
        .rev()
        .zip([3u32, 1].iter().copied().cycle())
        .map(|(b, weight)| u32::from(b - b'0') * weight)
        .sum();
    ((10 - sum % 10) % 10) as u8
}

fn verify_ean_check_digit(gtin: &str, family: GtinFamily) -> Result<(), SymbolError> {
    let (data, check) = gtin.split_at(gtin.len() - 1);
    let expected = ean_check_digit(data);
    if check.as_bytes()[0] - b'0' != expected {
        return Err(SymbolError::Unencodable {
            value: gtin.to_string(),
            symbology: family.label(),
            reason: format!("check digit mismatch, expected {expected}"),
        });
    }
    Ok(())
}

fn unencodable(gtin: &str, family: GtinFamily, err: impl std::fmt::Display) -> SymbolError {
    SymbolError::Unencodable {
        value: gtin.to_string(),
        symbology: family.label(),
        reason: err.to_string(),
    }
}
