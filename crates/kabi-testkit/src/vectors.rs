//! Golden test vectors for deterministic verification.
//!
//! Each vector pins both the canonical token stream and the CRC of one
//! exported symbol. The CRCs are what genksyms-compatible tools print for
//! the same stream, so a change here is an ABI-visible change.

use kabi_core::Checksum;
use kabi_signature::TypeSignatureSerializer;

use crate::fixtures::{
    add_fixture, array_fixture, enum_bitfield_fixture, list_fixture, mutual_fixture,
    opaque_fixture, ops_fixture, reset_fixture, typedef_fixture, union_fixture, UnitFixture,
};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// The C declaration the fixture models.
    pub declaration: &'static str,
    /// Builds the unit.
    pub fixture: fn() -> UnitFixture,
    /// Exported symbol to checksum.
    pub symbol: &'static str,
    /// Expected canonical token stream (each token followed by a space).
    pub expected_tokens: &'static str,
    /// Expected checksum (8 hex digits).
    pub expected_crc: &'static str,
}

impl GoldenVector {
    /// The output line this vector must produce.
    pub fn expected_line(&self) -> String {
        format!("__crc_{} = 0x{} ;", self.symbol, self.expected_crc)
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "two-argument function",
            declaration: "int add(int x, int y);",
            fixture: add_fixture,
            symbol: "add",
            expected_tokens: "int add ( int , int ) ",
            expected_crc: "72f367e8",
        },
        GoldenVector {
            name: "empty parameter list",
            declaration: "void reset(void);",
            fixture: reset_fixture,
            symbol: "reset",
            expected_tokens: "void reset ( void ) ",
            expected_crc: "a5b6bfc1",
        },
        GoldenVector {
            name: "self-referential struct",
            declaration: "int list_len(struct list_head *head);",
            fixture: list_fixture,
            symbol: "list_len",
            expected_tokens: "int list_len ( struct list_head { struct list_head * next ; \
                              struct list_head * prev ; } * ) ",
            expected_crc: "d1ee0d36",
        },
        GoldenVector {
            name: "opaque struct",
            declaration: "struct device *get_device(void);",
            fixture: opaque_fixture,
            symbol: "get_device",
            expected_tokens: "struct device { UNKNOWN } * get_device ( void ) ",
            expected_crc: "c43a13a9",
        },
        GoldenVector {
            name: "function pointer members",
            declaration: "int register_ops(struct file_ops *ops);",
            fixture: ops_fixture,
            symbol: "register_ops",
            expected_tokens: "int register_ops ( struct file_ops { int ( * open ) ( void * , int ) ; \
                              long ( * read ) ( char * , unsigned long ) ; } * ) ",
            expected_crc: "555b6196",
        },
        GoldenVector {
            name: "typedef members",
            declaration: "struct pkt_hdr default_hdr;",
            fixture: typedef_fixture,
            symbol: "default_hdr",
            expected_tokens: "struct pkt_hdr { unsigned int len ; unsigned short flags ; \
                              unsigned char * data ; } default_hdr ",
            expected_crc: "7ac40e19",
        },
        GoldenVector {
            name: "enum and bitfield",
            declaration: "struct cfg cfg_default;",
            fixture: enum_bitfield_fixture,
            symbol: "cfg_default",
            expected_tokens: "struct cfg { enum mode { MODE_OFF , MODE_ON , } mode ; \
                              unsigned int ready : 1 ; } cfg_default ",
            expected_crc: "9e923885",
        },
        GoldenVector {
            name: "array members",
            declaration: "struct ring rx_ring;",
            fixture: array_fixture,
            symbol: "rx_ring",
            expected_tokens: "struct ring { char name [ 16 ] ; void * slots [ ] ; } rx_ring ",
            expected_crc: "a9603050",
        },
        GoldenVector {
            name: "mutually recursive structs",
            declaration: "void link(struct a *x);",
            fixture: mutual_fixture,
            symbol: "link",
            expected_tokens: "void link ( struct a { struct b { struct a * back ; } * peer ; } * ) ",
            expected_crc: "bd8956bd",
        },
        GoldenVector {
            name: "union",
            declaration: "union value last_value;",
            fixture: union_fixture,
            symbol: "last_value",
            expected_tokens: "union value { long i ; double d ; } last_value ",
            expected_crc: "55b3f652",
        },
    ]
}

/// Serialize a vector's symbol, returning its token stream and checksum.
///
/// Returns `None` if the fixture does not declare the vector's symbol.
pub fn run_vector(vector: &GoldenVector) -> Option<(String, Checksum)> {
    let unit = (vector.fixture)();
    let symbol = unit.find(vector.symbol)?;

    let mut serializer = TypeSignatureSerializer::new(&unit.graph, &unit.typedefs).with_transcript();
    let crc = serializer.checksum_symbol(symbol);
    let tokens = serializer.transcript().unwrap_or_default().to_string();
    Some((tokens, crc))
}

/// Verify all golden vectors.
///
/// Returns `(name, matches, computed hex)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| match run_vector(v) {
            Some((tokens, crc)) => {
                let hex = crc.to_hex();
                let matches = tokens == v.expected_tokens && hex == v.expected_crc;
                (v.name.to_string(), matches, hex)
            }
            None => (v.name.to_string(), false, String::new()),
        })
        .collect()
}
