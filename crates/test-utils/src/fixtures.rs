//! Fixed ZPL documents for tests.

/// One label with a frame, a line of text and a Code 128 barcode.
pub const SHIPPING_LABEL: &str = "^XA\n\
^FO20,20^GB360,260,4^FS\n\
^CF0,30\n\
^FO40,40^FDShip To: ACME Corp^FS\n\
^FO40,90^A0N,24,24^FD1234 Industrial Way^FS\n\
^BY2,3,60\n\
^FO40,140^BCN,60,Y,N,N^FD12345678^FS\n\
^XZ";

/// Smallest label that still draws something.
pub const SINGLE_TEXT: &str = "^XA^FO10,10^A0N,20,20^FDHello^FS^XZ";

/// Two labels: the first is a solid bar, the second only text.
pub const TWO_LABELS: &str = "^XA^FO0,0^GB40,40,40^FS^XZ\n^XA^FO0,0^FDsecond^FS^XZ";

/// Label using graphics only, including reverse printing.
pub const GRAPHICS_ONLY: &str = "^XA\n\
^FO10,10^GB100,50,50^FS\n\
^FO20,20^FR^GB40,20,20^FS\n\
^FO150,10^GC60,4,B^FS\n\
^FO230,10^GE80,40,3^FS\n\
^XZ";

/// Well-formed input with no label block at all.
pub const NO_LABELS: &str = "this is plain text without any label block";

/// Opens a label that is never closed.
pub const UNTERMINATED: &str = "^XA^FO10,10^FDnever closed^FS";

/// Closes a label that was never opened.
pub const STRAY_END: &str = "^FO10,10^FDtext^FS^XZ";

/// Non-numeric coordinate.
pub const BAD_ARGUMENT: &str = "^XA^FOleft,10^FDx^FS^XZ";

/// Barcode data outside Code 128 subset B; parses fine, fails to render.
pub const UNENCODABLE_BARCODE: &str = "^XA^FO10,10^BCN,50,N^FDcaf\u{e9}^FS^XZ";
