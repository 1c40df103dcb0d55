//! Turns a command stream into label documents.

use label_common::{
    Anchor, Barcode128, FontSpec, GraphicBox, GraphicCircle, GraphicEllipse, LabelDocument,
    LabelElement, LineColor, Orientation, ParseError, ParseResult, Position, TextField,
};
use std::str::FromStr;

use crate::hex::decode_field_hex;
use crate::lexer::Command;

/// `^BY` state carried across fields within one label.
#[derive(Debug, Clone, Copy)]
struct BarcodeDefaults {
    module_width: u32,
    height: u32,
}

impl Default for BarcodeDefaults {
    fn default() -> Self {
        Self {
            module_width: 2,
            height: 10,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PendingGraphic {
    Box {
        width: u32,
        height: u32,
        thickness: u32,
        color: LineColor,
        rounding: u8,
    },
    Circle {
        diameter: u32,
        thickness: u32,
        color: LineColor,
    },
    Ellipse {
        width: u32,
        height: u32,
        thickness: u32,
        color: LineColor,
    },
}

#[derive(Debug, Clone, Copy)]
struct PendingBarcode {
    orientation: Orientation,
    height: u32,
    interpretation_line: bool,
    interpretation_above: bool,
}

/// Everything collected between two `^FS` commands.
#[derive(Debug, Default)]
struct FieldState {
    position: Option<Position>,
    font: Option<FontSpec>,
    reverse: bool,
    hex_indicator: Option<char>,
    barcode: Option<PendingBarcode>,
    graphic: Option<(PendingGraphic, usize)>,
    data: Option<(String, usize)>,
}

impl FieldState {
    fn pending_offset(&self) -> Option<usize> {
        self.data
            .as_ref()
            .map(|(_, offset)| *offset)
            .or(self.graphic.map(|(_, offset)| offset))
    }
}

/// State of one open `^XA` block.
#[derive(Debug)]
pub struct LabelBuilder {
    start: usize,
    document: LabelDocument,
    home: (i32, i32),
    default_font: FontSpec,
    default_orientation: Orientation,
    barcode_defaults: BarcodeDefaults,
    label_reverse: bool,
    field: FieldState,
}

impl LabelBuilder {
    pub fn new(start: usize) -> Self {
        Self {
            start,
            document: LabelDocument::default(),
            home: (0, 0),
            default_font: FontSpec::default(),
            default_orientation: Orientation::Normal,
            barcode_defaults: BarcodeDefaults::default(),
            label_reverse: false,
            field: FieldState::default(),
        }
    }

    pub fn start_offset(&self) -> usize {
        self.start
    }

    /// Close the label at `^XZ`.
    pub fn finish(self) -> ParseResult<LabelDocument> {
        if let Some(offset) = self.field.pending_offset() {
            return Err(ParseError::UnterminatedField { offset });
        }
        Ok(self.document)
    }

    /// Apply one command that appeared inside the label.
    pub fn apply(&mut self, command: &Command<'_>) -> ParseResult<()> {
        if command.prefix != '^' {
            tracing::trace!(code = %command.code, "Ignoring control command");
            return Ok(());
        }

        let code = command.code.as_str();
        let args = command.args;

        match code {
            "FO" | "FT" => {
                let anchor = if code == "FT" {
                    Anchor::Baseline
                } else {
                    Anchor::TopLeft
                };
                let parts = split_args(args);
                let x: i32 = num_arg(code, &parts, 0)?.unwrap_or(0);
                let y: i32 = num_arg(code, &parts, 1)?.unwrap_or(0);
                let offset = |home: i32, value: i32| {
                    home.checked_add(value)
                        .ok_or_else(|| ParseError::invalid_argument(code, args.trim()))
                };
                self.field.position = Some(Position {
                    x: offset(self.home.0, x)?,
                    y: offset(self.home.1, y)?,
                    anchor,
                });
            }
            "A" => {
                let font = self.parse_font(code, args, self.current_font())?;
                self.field.font = Some(font);
            }
            "CF" => {
                let mut font = self.parse_font(code, args, self.default_font)?;
                font.orientation = self.default_orientation;
                self.default_font = font;
            }
            "FW" => {
                let parts = split_args(args);
                if let Some(orientation) = orientation_arg(code, &parts, 0)? {
                    self.default_orientation = orientation;
                    self.default_font.orientation = orientation;
                }
            }
            "FD" | "FV" => {
                let data: String = args.chars().filter(|c| *c != '\r' && *c != '\n').collect();
                self.field.data = Some((data, command.offset));
            }
            "FR" => self.field.reverse = true,
            "FH" => {
                let indicator = args.trim().chars().next().unwrap_or('_');
                self.field.hex_indicator = Some(indicator);
            }
            "FS" => self.finish_field()?,
            "GB" => {
                let parts = split_args(args);
                let thickness: u32 = num_arg(code, &parts, 2)?.unwrap_or(1).max(1);
                let width: u32 = num_arg(code, &parts, 0)?.unwrap_or(thickness);
                let height: u32 = num_arg(code, &parts, 1)?.unwrap_or(thickness);
                let color = color_arg(code, &parts, 3)?.unwrap_or_default();
                let rounding: u8 = num_arg(code, &parts, 4)?.unwrap_or(0);
                self.field.graphic = Some((
                    PendingGraphic::Box {
                        width: width.max(thickness),
                        height: height.max(thickness),
                        thickness,
                        color,
                        rounding: rounding.min(8),
                    },
                    command.offset,
                ));
            }
            "GC" => {
                let parts = split_args(args);
                let diameter: u32 = num_arg(code, &parts, 0)?.unwrap_or(3);
                let thickness: u32 = num_arg(code, &parts, 1)?.unwrap_or(1).max(1);
                let color = color_arg(code, &parts, 2)?.unwrap_or_default();
                self.field.graphic = Some((
                    PendingGraphic::Circle {
                        diameter: diameter.max(thickness),
                        thickness,
                        color,
                    },
                    command.offset,
                ));
            }
            "GE" => {
                let parts = split_args(args);
                let thickness: u32 = num_arg(code, &parts, 2)?.unwrap_or(1).max(1);
                let width: u32 = num_arg(code, &parts, 0)?.unwrap_or(thickness);
                let height: u32 = num_arg(code, &parts, 1)?.unwrap_or(thickness);
                let color = color_arg(code, &parts, 3)?.unwrap_or_default();
                self.field.graphic = Some((
                    PendingGraphic::Ellipse {
                        width: width.max(thickness),
                        height: height.max(thickness),
                        thickness,
                        color,
                    },
                    command.offset,
                ));
            }
            "BY" => {
                let parts = split_args(args);
                if let Some(width) = num_arg::<u32>(code, &parts, 0)? {
                    self.barcode_defaults.module_width = width.clamp(1, 10);
                }
                // wide-to-narrow ratio only applies to two-width symbologies
                let _ratio: Option<f32> = num_arg(code, &parts, 1)?;
                if let Some(height) = num_arg::<u32>(code, &parts, 2)? {
                    self.barcode_defaults.height = height.max(1);
                }
            }
            "BC" => {
                let parts = split_args(args);
                let orientation =
                    orientation_arg(code, &parts, 0)?.unwrap_or(self.default_orientation);
                let height: u32 = num_arg(code, &parts, 1)?
                    .unwrap_or(self.barcode_defaults.height)
                    .max(1);
                let interpretation_line = flag_arg(code, &parts, 2)?.unwrap_or(true);
                let interpretation_above = flag_arg(code, &parts, 3)?.unwrap_or(false);
                self.field.barcode = Some(PendingBarcode {
                    orientation,
                    height,
                    interpretation_line,
                    interpretation_above,
                });
            }
            "LH" => {
                let parts = split_args(args);
                let x: i32 = num_arg(code, &parts, 0)?.unwrap_or(0);
                let y: i32 = num_arg(code, &parts, 1)?.unwrap_or(0);
                self.home = (x, y);
            }
            "PW" => {
                self.document.print_width = num_arg(code, &split_args(args), 0)?;
            }
            "LL" => {
                self.document.label_length = num_arg(code, &split_args(args), 0)?;
            }
            "LR" => {
                if let Some(flag) = flag_arg(code, &split_args(args), 0)? {
                    self.label_reverse = flag;
                }
            }
            "PO" => {
                let parts = split_args(args);
                match parts.first().and_then(|p| p.chars().next()) {
                    Some('I') | Some('i') => self.document.inverted = true,
                    Some('N') | Some('n') | None => self.document.inverted = false,
                    Some(_) => return Err(ParseError::invalid_argument(code, args.trim())),
                }
            }
            "FX" => {}
            _ => tracing::trace!(code = %code, "Ignoring unsupported command"),
        }

        Ok(())
    }

    fn current_font(&self) -> FontSpec {
        self.field.font.unwrap_or(self.default_font)
    }

    /// Parse `f o,h,w` (for `^A`) or `f,h,w` (for `^CF`).
    fn parse_font(&self, code: &str, args: &str, base: FontSpec) -> ParseResult<FontSpec> {
        let args = args.trim();
        let mut chars = args.chars();
        let name = match chars.next() {
            Some(',') | None => base.name,
            Some(c) => c.to_ascii_uppercase(),
        };
        let rest = if args.starts_with(',') {
            args
        } else {
            chars.as_str()
        };

        let mut font = FontSpec { name, ..base };
        let parts = split_args(rest);

        if code == "A" {
            // ^A0N,30,30: orientation is glued to the designator
            let orientation_part = parts.first().copied().unwrap_or("");
            font.orientation = match orientation_part.chars().next() {
                Some(c) => Orientation::from_code(c)
                    .ok_or_else(|| ParseError::invalid_argument(code, orientation_part))?,
                None => self.default_orientation,
            };
        }

        let height: Option<u32> = num_arg(code, &parts, 1)?;
        let width: Option<u32> = num_arg(code, &parts, 2)?;
        match (height, width) {
            (Some(h), Some(w)) => {
                font.height = h.max(1);
                font.width = w.max(1);
            }
            (Some(h), None) => {
                font.height = h.max(1);
                font.width = font.height;
            }
            (None, Some(w)) => font.width = w.max(1),
            (None, None) => {}
        }

        Ok(font)
    }

    fn finish_field(&mut self) -> ParseResult<()> {
        let field = std::mem::take(&mut self.field);
        let position = field.position.unwrap_or(Position {
            x: self.home.0,
            y: self.home.1,
            anchor: Anchor::TopLeft,
        });
        let reverse = field.reverse || self.label_reverse;

        if let Some((graphic, _)) = field.graphic {
            let element = match graphic {
                PendingGraphic::Box {
                    width,
                    height,
                    thickness,
                    color,
                    rounding,
                } => LabelElement::GraphicBox(GraphicBox {
                    position,
                    width,
                    height,
                    thickness,
                    color,
                    rounding,
                    reverse,
                }),
                PendingGraphic::Circle {
                    diameter,
                    thickness,
                    color,
                } => LabelElement::GraphicCircle(GraphicCircle {
                    position,
                    diameter,
                    thickness,
                    color,
                    reverse,
                }),
                PendingGraphic::Ellipse {
                    width,
                    height,
                    thickness,
                    color,
                } => LabelElement::GraphicEllipse(GraphicEllipse {
                    position,
                    width,
                    height,
                    thickness,
                    color,
                    reverse,
                }),
            };
            self.document.elements.push(element);
            return Ok(());
        }

        let Some((raw, _)) = field.data else {
            // ^FS with nothing to draw
            return Ok(());
        };

        let text = match field.hex_indicator {
            Some(indicator) => decode_field_hex(&raw, indicator)?,
            None => raw,
        };

        let element = match field.barcode {
            Some(barcode) => LabelElement::Barcode128(Barcode128 {
                position,
                orientation: barcode.orientation,
                module_width: self.barcode_defaults.module_width,
                height: barcode.height,
                interpretation_line: barcode.interpretation_line,
                interpretation_above: barcode.interpretation_above,
                data: text,
                reverse,
            }),
            None => LabelElement::Text(TextField {
                position,
                font: field.font.unwrap_or(self.default_font),
                text,
                reverse,
            }),
        };
        self.document.elements.push(element);
        Ok(())
    }
}

fn split_args(args: &str) -> Vec<&str> {
    args.split(',').map(str::trim).collect()
}

fn num_arg<T: FromStr>(code: &str, parts: &[&str], index: usize) -> ParseResult<Option<T>> {
    match parts.get(index).copied() {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| ParseError::invalid_argument(code, raw)),
    }
}

fn orientation_arg(code: &str, parts: &[&str], index: usize) -> ParseResult<Option<Orientation>> {
    match parts.get(index).copied() {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .chars()
            .next()
            .and_then(Orientation::from_code)
            .map(Some)
            .ok_or_else(|| ParseError::invalid_argument(code, raw)),
    }
}

fn color_arg(code: &str, parts: &[&str], index: usize) -> ParseResult<Option<LineColor>> {
    match parts.get(index).copied() {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .chars()
            .next()
            .and_then(LineColor::from_code)
            .map(Some)
            .ok_or_else(|| ParseError::invalid_argument(code, raw)),
    }
}

fn flag_arg(code: &str, parts: &[&str], index: usize) -> ParseResult<Option<bool>> {
    match parts.get(index).copied() {
        None | Some("") => Ok(None),
        Some(raw) => match raw.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('Y') => Ok(Some(true)),
            Some('N') => Ok(Some(false)),
            _ => Err(ParseError::invalid_argument(code, raw)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn build(body: &str) -> ParseResult<LabelDocument> {
        let mut builder = LabelBuilder::new(0);
        for command in tokenize(body) {
            builder.apply(&command)?;
        }
        builder.finish()
    }

    #[test]
    fn test_split_args_trims() {
        assert_eq!(split_args(" 10 , 20\n"), ["10", "20"]);
    }

    #[test]
    fn test_font_with_orientation() {
        let doc = build("^FO5,5^A0R,40,20^FDx^FS").unwrap();
        let LabelElement::Text(text) = &doc.elements[0] else {
            panic!("expected text");
        };
        assert_eq!(text.font.name, '0');
        assert_eq!(text.font.orientation, Orientation::Rotated90);
        assert_eq!((text.font.height, text.font.width), (40, 20));
    }

    #[test]
    fn test_font_height_only_sets_square_cell() {
        let doc = build("^A0N,50^FDx^FS").unwrap();
        let LabelElement::Text(text) = &doc.elements[0] else {
            panic!("expected text");
        };
        assert_eq!((text.font.height, text.font.width), (50, 50));
    }

    #[test]
    fn test_change_default_font_applies_to_later_fields() {
        let doc = build("^CF0,60^FO0,0^FDa^FS^FO0,80^FDb^FS").unwrap();
        for element in &doc.elements {
            let LabelElement::Text(text) = element else {
                panic!("expected text");
            };
            assert_eq!(text.font.height, 60);
            assert_eq!(text.font.name, '0');
        }
    }

    #[test]
    fn test_field_state_resets_after_fs() {
        let doc = build("^FO10,10^FR^A0N,40^FDa^FS^FDb^FS").unwrap();
        let LabelElement::Text(second) = &doc.elements[1] else {
            panic!("expected text");
        };
        assert!(!second.reverse);
        assert_eq!(second.position, Position::default());
        assert_eq!(second.font, FontSpec::default());
    }

    #[test]
    fn test_graphic_box_minimums() {
        let doc = build("^FO0,0^GB2,100,6^FS").unwrap();
        let LabelElement::GraphicBox(gb) = &doc.elements[0] else {
            panic!("expected box");
        };
        assert_eq!(gb.width, 6);
        assert_eq!(gb.height, 100);
        assert_eq!(gb.thickness, 6);
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let err = build("^FO0,0^GB10,10,1,Q^FS").unwrap_err();
        assert_eq!(err, ParseError::invalid_argument("GB", "Q"));
    }

    #[test]
    fn test_barcode_takes_by_defaults() {
        let doc = build("^BY3,2.5,77^FO0,0^BCN,,N^FD123^FS").unwrap();
        let LabelElement::Barcode128(bc) = &doc.elements[0] else {
            panic!("expected barcode");
        };
        assert_eq!(bc.module_width, 3);
        assert_eq!(bc.height, 77);
        assert!(!bc.interpretation_line);
        assert_eq!(bc.data, "123");
    }

    #[test]
    fn test_pending_data_without_fs() {
        let err = build("^FO0,0^FDdangling").unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedField { offset: 6 }));
    }
}
