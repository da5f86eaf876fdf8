//! Test fixtures and helpers.
//!
//! [`UnitFixture`] builds the type graph of a small C file one declaration
//! at a time, the way a front-end would hand it over. The `*_fixture`
//! functions are the canned declarations behind the golden vectors.

use kabi_core::{NodeId, TypeGraph, TypeKind, TypeNode};
use kabi_typedef::{AliasDef, AliasFragment, TypedefTable};

/// Marker prefix used by [`UnitFixture::export`].
pub const MARKER_PREFIX: &str = "__ksymtab_";

/// A compilation unit under construction.
#[derive(Debug, Clone, Default)]
pub struct UnitFixture {
    pub name: String,
    pub graph: TypeGraph,
    /// Top-level symbols in declaration order.
    pub symbols: Vec<NodeId>,
    pub typedefs: TypedefTable,
}

impl UnitFixture {
    /// Create an empty fixture.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// A spelled base type such as `int`.
    pub fn base(&mut self, name: &str) -> NodeId {
        self.graph.add(TypeNode::anonymous(TypeKind::BaseType {
            name: name.to_string(),
        }))
    }

    pub fn pointer(&mut self, to: NodeId) -> NodeId {
        self.graph.add(TypeNode::anonymous(TypeKind::Pointer { base: to }))
    }

    pub fn array(&mut self, of: NodeId, size: Option<u64>) -> NodeId {
        self.graph.add(TypeNode::anonymous(TypeKind::Array { base: of, size }))
    }

    pub fn function(&mut self, ret: NodeId, params: Vec<NodeId>) -> NodeId {
        self.graph
            .add(TypeNode::anonymous(TypeKind::Function { ret, params }))
    }

    /// A named binding: member, parameter or variable.
    pub fn bind(&mut self, ident: &str, ty: NodeId) -> NodeId {
        self.graph.add(TypeNode::named(ident, TypeKind::Node { base: ty }))
    }

    /// A struct tag with no members yet, for recursive definitions.
    pub fn declare_struct(&mut self, tag: &str) -> NodeId {
        self.graph
            .add(TypeNode::named(tag, TypeKind::Struct { members: vec![] }))
    }

    /// Fill in the members of a struct made by [`declare_struct`](Self::declare_struct).
    pub fn define_struct(&mut self, id: NodeId, members: Vec<NodeId>) {
        let tag = self.graph.ident(id).map(str::to_string);
        self.graph.set(
            id,
            TypeNode {
                ident: tag,
                kind: TypeKind::Struct { members },
            },
        );
    }

    pub fn structure(&mut self, tag: &str, members: Vec<NodeId>) -> NodeId {
        self.graph
            .add(TypeNode::named(tag, TypeKind::Struct { members }))
    }

    pub fn union(&mut self, tag: &str, members: Vec<NodeId>) -> NodeId {
        self.graph
            .add(TypeNode::named(tag, TypeKind::Union { members }))
    }

    pub fn enumeration(&mut self, tag: &str, enumerators: &[&str]) -> NodeId {
        let enumerators = enumerators.iter().map(|e| e.to_string()).collect();
        self.graph
            .add(TypeNode::named(tag, TypeKind::Enum { enumerators }))
    }

    pub fn bitfield(&mut self, ident: &str, base: NodeId, width: u32) -> NodeId {
        self.graph
            .add(TypeNode::named(ident, TypeKind::Bitfield { base, width }))
    }

    /// A use of a typedef name.
    pub fn alias(&mut self, name: &str) -> NodeId {
        self.graph.add(TypeNode::anonymous(TypeKind::TypedefAlias {
            name: name.to_string(),
            base: None,
        }))
    }

    /// Define a typedef.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already defined or `fragments` is empty.
    pub fn typedef(&mut self, name: &str, fragments: Vec<AliasFragment>) {
        self.typedefs
            .define(AliasDef::new(name, fragments))
            .expect("fixture typedef must be new and non-empty");
    }

    /// Record that `ident` inside `scope` is declared through `alias`.
    pub fn govern(&mut self, scope: Option<NodeId>, ident: &str, alias: &str) {
        self.typedefs.govern(scope, ident, alias);
    }

    /// A top-level declaration.
    pub fn symbol(&mut self, ident: &str, ty: NodeId) -> NodeId {
        let id = self.bind(ident, ty);
        self.symbols.push(id);
        id
    }

    /// A `__ksymtab_<name>` marker symbol.
    pub fn export(&mut self, name: &str) -> NodeId {
        let marker = self.declare_struct("kernel_symbol");
        self.symbol(&format!("{MARKER_PREFIX}{name}"), marker)
    }

    /// A top-level declaration followed by its export marker.
    pub fn exported(&mut self, ident: &str, ty: NodeId) -> NodeId {
        let id = self.symbol(ident, ty);
        self.export(ident);
        id
    }

    /// Look up a top-level symbol by name.
    pub fn find(&self, ident: &str) -> Option<NodeId> {
        self.symbols
            .iter()
            .copied()
            .find(|&id| self.graph.ident(id) == Some(ident))
    }
}

fn terminal(text: &str) -> AliasFragment {
    AliasFragment::Terminal(text.to_string())
}

fn alias_of(name: &str) -> AliasFragment {
    AliasFragment::AliasOf(name.to_string())
}

/// `int add(int x, int y);`
pub fn add_fixture() -> UnitFixture {
    let mut f = UnitFixture::new("add.c");
    let int = f.base("int");
    let x = f.bind("x", int);
    let y = f.bind("y", int);
    let func = f.function(int, vec![x, y]);
    f.exported("add", func);
    f
}

/// `void reset(void);`
pub fn reset_fixture() -> UnitFixture {
    let mut f = UnitFixture::new("reset.c");
    let void = f.base("void");
    let func = f.function(void, vec![]);
    f.exported("reset", func);
    f
}

/// `int list_len(struct list_head *head);` over a doubly linked list head.
pub fn list_fixture() -> UnitFixture {
    let mut f = UnitFixture::new("list.c");
    let int = f.base("int");
    let list = f.declare_struct("list_head");
    let lp = f.pointer(list);
    let next = f.bind("next", lp);
    let prev = f.bind("prev", lp);
    f.define_struct(list, vec![next, prev]);

    let head = f.bind("head", lp);
    let func = f.function(int, vec![head]);
    f.exported("list_len", func);
    f
}

/// `struct device *get_device(void);` with `struct device` left opaque.
pub fn opaque_fixture() -> UnitFixture {
    let mut f = UnitFixture::new("device.c");
    let dev = f.structure("device", vec![]);
    let dp = f.pointer(dev);
    let func = f.function(dp, vec![]);
    f.exported("get_device", func);
    f
}

/// `int register_ops(struct file_ops *ops);` where the struct holds
/// function pointers.
pub fn ops_fixture() -> UnitFixture {
    let mut f = UnitFixture::new("ops.c");
    let int = f.base("int");
    let long = f.base("long");
    let void = f.base("void");
    let ch = f.base("char");
    let ulong = f.base("unsigned long");

    let vp = f.pointer(void);
    let data = f.bind("data", vp);
    let mode = f.bind("mode", int);
    let open_fn = f.function(int, vec![data, mode]);
    let open_ptr = f.pointer(open_fn);
    let open = f.bind("open", open_ptr);

    let cp = f.pointer(ch);
    let buf = f.bind("buf", cp);
    let len = f.bind("len", ulong);
    let read_fn = f.function(long, vec![buf, len]);
    let read_ptr = f.pointer(read_fn);
    let read = f.bind("read", read_ptr);

    let ops = f.structure("file_ops", vec![open, read]);
    let op = f.pointer(ops);
    let param = f.bind("ops", op);
    let func = f.function(int, vec![param]);
    f.exported("register_ops", func);
    f
}

/// `struct pkt_hdr default_hdr;` with typedef-declared members.
pub fn typedef_fixture() -> UnitFixture {
    let mut f = UnitFixture::new("pkt.c");
    f.typedef("__u32", vec![terminal("unsigned int")]);
    f.typedef("u32", vec![alias_of("__u32")]);
    f.typedef("u16", vec![terminal("unsigned short")]);
    f.typedef("u8", vec![terminal("unsigned char")]);

    let u32_ty = f.alias("u32");
    let u16_ty = f.alias("u16");
    let u8_ty = f.alias("u8");
    let len = f.bind("len", u32_ty);
    let flags = f.bind("flags", u16_ty);
    let u8_ptr = f.pointer(u8_ty);
    let data = f.bind("data", u8_ptr);
    let hdr = f.structure("pkt_hdr", vec![len, flags, data]);

    f.govern(Some(hdr), "len", "u32");
    f.govern(Some(hdr), "flags", "u16");
    f.govern(Some(hdr), "data", "u8");
    f.exported("default_hdr", hdr);
    f
}

/// `struct cfg cfg_default;` holding an enum and a bitfield.
pub fn enum_bitfield_fixture() -> UnitFixture {
    let mut f = UnitFixture::new("cfg.c");
    let mode = f.enumeration("mode", &["MODE_OFF", "MODE_ON"]);
    let member = f.bind("mode", mode);
    let uint = f.base("unsigned int");
    let ready = f.bitfield("ready", uint, 1);
    let cfg = f.structure("cfg", vec![member, ready]);
    f.exported("cfg_default", cfg);
    f
}

/// `struct ring rx_ring;` with a sized and a flexible array member.
pub fn array_fixture() -> UnitFixture {
    let mut f = UnitFixture::new("ring.c");
    let ch = f.base("char");
    let name_arr = f.array(ch, Some(16));
    let name = f.bind("name", name_arr);
    let void = f.base("void");
    let vp = f.pointer(void);
    let slot_arr = f.array(vp, None);
    let slots = f.bind("slots", slot_arr);
    let ring = f.structure("ring", vec![name, slots]);
    f.exported("rx_ring", ring);
    f
}

/// `void link(struct a *x);` where `struct a` and `struct b` point at
/// each other.
pub fn mutual_fixture() -> UnitFixture {
    let mut f = UnitFixture::new("link.c");
    let void = f.base("void");
    let a = f.declare_struct("a");
    let b = f.declare_struct("b");
    let pa = f.pointer(a);
    let pb = f.pointer(b);
    let peer = f.bind("peer", pb);
    let back = f.bind("back", pa);
    f.define_struct(a, vec![peer]);
    f.define_struct(b, vec![back]);

    let x = f.bind("x", pa);
    let func = f.function(void, vec![x]);
    f.exported("link", func);
    f
}

/// `union value last_value;`
pub fn union_fixture() -> UnitFixture {
    let mut f = UnitFixture::new("value.c");
    let long = f.base("long");
    let double = f.base("double");
    let i = f.bind("i", long);
    let d = f.bind("d", double);
    let value = f.union("value", vec![i, d]);
    f.exported("last_value", value);
    f
}
