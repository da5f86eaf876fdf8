//! Proptest generators for property-based testing.

use proptest::prelude::*;

use kabi_core::NodeId;
use kabi_typedef::{AliasDef, AliasFragment, TypedefTable};

use crate::fixtures::UnitFixture;

/// Generate a C identifier.
pub fn identifier() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,15}".prop_map(String::from)
}

/// Generate a spelled base type.
pub fn base_type_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("char"),
        Just("short"),
        Just("int"),
        Just("long"),
        Just("unsigned int"),
        Just("unsigned long"),
        Just("long long"),
        Just("_Bool"),
    ]
}

/// The type of one generated struct member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberType {
    Base(&'static str),
    /// Pointer back to the enclosing struct.
    SelfPointer,
    Array(&'static str, u64),
    Bitfield(&'static str, u32),
    /// Pointer to a function taking and returning base types.
    Callback(&'static str, Vec<&'static str>),
}

/// Generate a member type.
pub fn member_type() -> impl Strategy<Value = MemberType> {
    prop_oneof![
        4 => base_type_name().prop_map(MemberType::Base),
        1 => Just(MemberType::SelfPointer),
        1 => (base_type_name(), 0u64..64).prop_map(|(b, n)| MemberType::Array(b, n)),
        1 => (base_type_name(), 1u32..32).prop_map(|(b, w)| MemberType::Bitfield(b, w)),
        1 => (base_type_name(), prop::collection::vec(base_type_name(), 0..4))
            .prop_map(|(ret, params)| MemberType::Callback(ret, params)),
    ]
}

/// Parameters for generating a struct and an exported function over it.
#[derive(Debug, Clone)]
pub struct StructParams {
    pub tag: String,
    pub members: Vec<(String, MemberType)>,
    /// Name of the exported function `int <function>(struct <tag> *)`.
    pub function: String,
}

impl Arbitrary for StructParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            identifier(),
            prop::collection::vec((identifier(), member_type()), 0..8),
            identifier(),
        )
            .prop_map(|(tag, members, function)| StructParams {
                tag,
                members,
                function,
            })
            .boxed()
    }
}

/// Build a unit declaring the struct and exporting the function.
///
/// Returns the fixture and the exported function's symbol.
pub fn fixture_from_params(params: &StructParams) -> (UnitFixture, NodeId) {
    let mut f = UnitFixture::new("generated.c");
    let int = f.base("int");
    let tag = f.declare_struct(&params.tag);
    let tag_ptr = f.pointer(tag);

    let mut members = Vec::with_capacity(params.members.len());
    for (name, ty) in &params.members {
        let member = match ty {
            MemberType::Base(base) => {
                let b = f.base(base);
                f.bind(name, b)
            }
            MemberType::SelfPointer => f.bind(name, tag_ptr),
            MemberType::Array(base, size) => {
                let b = f.base(base);
                let arr = f.array(b, Some(*size));
                f.bind(name, arr)
            }
            MemberType::Bitfield(base, width) => {
                let b = f.base(base);
                f.bitfield(name, b, *width)
            }
            MemberType::Callback(ret, args) => {
                let r = f.base(ret);
                let arg_ids = args
                    .iter()
                    .map(|a| {
                        let b = f.base(a);
                        f.bind("arg", b)
                    })
                    .collect();
                let func = f.function(r, arg_ids);
                let ptr = f.pointer(func);
                f.bind(name, ptr)
            }
        };
        members.push(member);
    }
    f.define_struct(tag, members);

    let param = f.bind("obj", tag_ptr);
    let func = f.function(int, vec![param]);
    let symbol = f.exported(&params.function, func);
    (f, symbol)
}

/// Generate a typedef table over a fixed set of names, cycles included.
pub fn typedef_table() -> impl Strategy<Value = TypedefTable> {
    const NAMES: [&str; 6] = ["t0", "t1", "t2", "t3", "t4", "t5"];
    let fragment = prop_oneof![
        base_type_name().prop_map(|b| AliasFragment::Terminal(b.to_string())),
        (0..NAMES.len()).prop_map(|i| AliasFragment::AliasOf(NAMES[i].to_string())),
    ];
    prop::collection::vec(prop::collection::vec(fragment, 1..4), NAMES.len()).prop_map(|defs| {
        let mut table = TypedefTable::new();
        for (name, fragments) in NAMES.iter().zip(defs) {
            table
                .define(AliasDef::new(*name, fragments))
                .expect("generated names are distinct");
        }
        table
    })
}
