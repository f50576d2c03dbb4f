//! Flat node-table form of a guard
//!
//! Building a [`Program`] walks a [`Schema`] once and lowers it into a table
//! of [`Node`]s addressed by index. The per-call walk then never revisits the
//! schema's structure:
//!
//! - unions are flattened, primitive members folded into one [`KindSet`]
//!   test and literal members kept as an equality list;
//! - object fields are partitioned into required and optional lists, and
//!   optional fields that accept everything are dropped;
//! - exact-object key sets are hashed once;
//! - `array(unknown)`, `record(unknown)` and empty open objects become plain
//!   kind tests;
//! - recursion becomes a back-edge to the node of the enclosing
//!   [`Schema::Recursive`].
//!
//! The finished table is then emitted as a tree of closures specialized to
//! each node, which is what [`Program::check`] runs. Kind tests stay inline
//! in their parent instead of becoming a call. Back-edges index a slot table
//! handed down the call, so the tree holds no reference cycle.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::combinators::Literal;
use crate::compile::CompileOptions;
use crate::schema::{Predicate, RecursionId, Schema};
use crate::value::{Kind, KindSet, Map, UNDEFINED, Value};

/// Index of a node in a [`Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0
    }
}

type Fields = Box<[(Box<str>, NodeId)]>;

#[derive(Debug, Clone)]
enum Node {
    Any,
    Nothing,
    Kinds(KindSet),
    Equals(Literal),
    Union {
        kinds: KindSet,
        literals: Box<[Literal]>,
        rest: Box<[NodeId]>,
    },
    Tuple(Box<[NodeId]>),
    Object {
        required: Fields,
        optional: Fields,
        exact: Option<HashSet<Box<str>>>,
    },
    Record(NodeId),
    Array(NodeId),
    Custom(Predicate),
    /// Slot of a recursive binding whose body has no base case.
    Unbound,
}

/// Build figures, reported once per compiled guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgramStats {
    pub nodes: usize,
    pub objects: usize,
    pub fields: usize,
    pub pruned_fields: usize,
    /// Closures in the emitted tree; inline kind tests are not counted.
    pub closures: usize,
}

/// A guard lowered into a flat node table and emitted as a closure tree.
#[derive(Clone)]
pub struct Program {
    nodes: Vec<Node>,
    root: NodeId,
    entry: Test,
    slots: Slots,
    stats: ProgramStats,
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("nodes", &self.nodes)
            .field("root", &self.root)
            .field("slots", &self.slots.0.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Program {
    /// Lowers a schema.
    pub fn build(schema: &Schema, options: CompileOptions) -> Self {
        let mut builder = Builder {
            options,
            nodes: Vec::new(),
            bindings: HashMap::new(),
        };
        let root = builder.lower(schema);

        let mut program = Self {
            nodes: builder.nodes,
            root,
            entry: Test::Any,
            slots: Slots::default(),
            stats: ProgramStats::default(),
        };
        program.finalize(options);
        program.emit(&builder.bindings);

        tracing::debug!(
            nodes = program.stats.nodes,
            objects = program.stats.objects,
            fields = program.stats.fields,
            pruned_fields = program.stats.pruned_fields,
            closures = program.stats.closures,
            schema_size = schema.size(),
            "built guard program"
        );
        program
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn stats(&self) -> ProgramStats {
        self.stats
    }

    /// Runs the program from its root.
    #[inline]
    pub fn check(&self, value: &Value) -> bool {
        self.entry.run(value, &self.slots)
    }

    /// Walks the node table directly. Only the build step uses this, before
    /// the closure tree exists.
    fn eval(&self, id: NodeId, value: &Value) -> bool {
        match &self.nodes[id.0] {
            Node::Any => true,
            Node::Nothing | Node::Unbound => false,
            Node::Kinds(kinds) => kinds.contains(value.kind()),
            Node::Equals(literal) => literal.matches(value),
            Node::Union {
                kinds,
                literals,
                rest,
            } => {
                kinds.contains(value.kind())
                    || literals.iter().any(|l| l.matches(value))
                    || rest.iter().any(|&member| self.eval(member, value))
            }
            Node::Tuple(items) => match value {
                Value::Array(values) => {
                    values.len() == items.len()
                        && items.iter().zip(values).all(|(&n, v)| self.eval(n, v))
                }
                _ => false,
            },
            Node::Object {
                required,
                optional,
                exact,
            } => match value {
                Value::Object(map) => self.eval_object(map, required, optional, exact.as_ref()),
                _ => false,
            },
            Node::Record(inner) => match value {
                Value::Object(map) => map.values().all(|v| self.eval(*inner, v)),
                _ => false,
            },
            Node::Array(inner) => match value {
                Value::Array(values) => values.iter().all(|v| self.eval(*inner, v)),
                _ => false,
            },
            Node::Custom(predicate) => predicate.call(value),
        }
    }

    #[inline]
    fn eval_object(
        &self,
        map: &Map,
        required: &[(Box<str>, NodeId)],
        optional: &[(Box<str>, NodeId)],
        exact: Option<&HashSet<Box<str>>>,
    ) -> bool {
        required
            .iter()
            .all(|(key, n)| map.get(&**key).is_some_and(|v| self.eval(*n, v)))
            && optional
                .iter()
                .all(|(key, n)| map.get(&**key).is_none_or(|v| self.eval(*n, v)))
            && exact.is_none_or(|keys| map.keys().all(|k| keys.contains(k.as_str())))
    }

    /// Classifies object fields and applies the object-level rewrites.
    ///
    /// Runs after lowering because a field's node may be a recursive slot that
    /// was only filled once its binding finished. Classification evaluates
    /// on `undefined`, which never descends into an object, so the order in
    /// which objects are visited does not matter.
    fn finalize(&mut self, options: CompileOptions) {
        let mut stats = ProgramStats::default();

        for index in 0..self.nodes.len() {
            let (fields, exact) = match &self.nodes[index] {
                Node::Object {
                    required, exact, ..
                } => (required.clone(), exact.clone()),
                _ => continue,
            };

            let mut keep_required = Vec::new();
            let mut keep_optional = Vec::new();
            for (key, id) in fields {
                stats.fields += 1;
                if !self.eval(id, &UNDEFINED) {
                    keep_required.push((key, id));
                } else if options.prune_trivial_fields() && matches!(self.nodes[id.0], Node::Any) {
                    stats.pruned_fields += 1;
                } else {
                    keep_optional.push((key, id));
                }
            }

            let collapses = options.prune_trivial_fields()
                && exact.is_none()
                && keep_required.is_empty()
                && keep_optional.is_empty();

            self.nodes[index] = if collapses {
                Node::Kinds(KindSet::only(Kind::Object))
            } else {
                Node::Object {
                    required: keep_required.into_boxed_slice(),
                    optional: keep_optional.into_boxed_slice(),
                    exact,
                }
            };
            stats.objects += 1;
        }

        stats.nodes = self.nodes.len();
        self.stats = stats;
    }

    /// Emits the closure tree from the finalized table.
    fn emit(&mut self, bindings: &HashMap<RecursionId, NodeId>) {
        let mut slot_ids: Vec<NodeId> = bindings.values().copied().collect();
        slot_ids.sort_by_key(|id| id.0);

        let mut emitter = Emitter {
            nodes: &self.nodes,
            slots: slot_ids.iter().enumerate().map(|(k, &id)| (id, k)).collect(),
            closures: 0,
        };
        let entry = emitter.reference(self.root);
        let slots = slot_ids
            .iter()
            .map(|&id| emitter.node(id).into_check())
            .collect();

        self.stats.closures = emitter.closures;
        self.entry = entry;
        self.slots = Slots(slots);
    }
}

// ============================================================================
// EMITTED FORM
// ============================================================================

type Check = Arc<dyn Fn(&Value, &Slots) -> bool + Send + Sync>;
type FieldTests = Box<[(Box<str>, Test)]>;

/// Bodies of recursive bindings, indexed by back-edges.
#[derive(Clone, Default)]
struct Slots(Box<[Check]>);

impl Slots {
    #[inline]
    fn run(&self, slot: usize, value: &Value) -> bool {
        self.0.get(slot).is_some_and(|check| check(value, self))
    }
}

/// One emitted test. Kind tests are matched inline by the caller.
#[derive(Clone)]
enum Test {
    Any,
    Kinds(KindSet),
    Call(Check),
}

impl Test {
    #[inline]
    fn run(&self, value: &Value, slots: &Slots) -> bool {
        match self {
            Self::Any => true,
            Self::Kinds(kinds) => kinds.contains(value.kind()),
            Self::Call(check) => check(value, slots),
        }
    }

    fn into_check(self) -> Check {
        match self {
            Self::Any => Arc::new(|_: &Value, _: &Slots| true),
            Self::Kinds(kinds) => Arc::new(move |value: &Value, _: &Slots| kinds.contains(value.kind())),
            Self::Call(check) => check,
        }
    }
}

struct Emitter<'p> {
    nodes: &'p [Node],
    slots: HashMap<NodeId, usize>,
    closures: usize,
}

impl Emitter<'_> {
    fn call(&mut self, check: Check) -> Test {
        self.closures += 1;
        Test::Call(check)
    }

    /// A use of `id`: recursive slots become back-edges.
    fn reference(&mut self, id: NodeId) -> Test {
        match self.slots.get(&id) {
            Some(&slot) => self.call(Arc::new(move |value: &Value, slots: &Slots| {
                slots.run(slot, value)
            })),
            None => self.node(id),
        }
    }

    fn fields(&mut self, fields: &[(Box<str>, NodeId)]) -> FieldTests {
        fields
            .iter()
            .map(|(key, id)| (key.clone(), self.reference(*id)))
            .collect()
    }

    fn node(&mut self, id: NodeId) -> Test {
        let nodes = self.nodes;
        match &nodes[id.0] {
            Node::Any => Test::Any,
            Node::Nothing | Node::Unbound => Test::Kinds(KindSet::EMPTY),
            Node::Kinds(kinds) => Test::Kinds(*kinds),
            Node::Equals(literal) => {
                let literal = literal.clone();
                self.call(Arc::new(move |value: &Value, _: &Slots| literal.matches(value)))
            }
            Node::Union {
                kinds,
                literals,
                rest,
            } => {
                let kinds = *kinds;
                let literals = literals.clone();
                let rest: Box<[Test]> = rest.iter().map(|&m| self.reference(m)).collect();
                if literals.is_empty() && rest.is_empty() {
                    return Test::Kinds(kinds);
                }
                self.call(Arc::new(move |value: &Value, slots: &Slots| {
                    kinds.contains(value.kind())
                        || literals.iter().any(|l| l.matches(value))
                        || rest.iter().any(|m| m.run(value, slots))
                }))
            }
            Node::Tuple(items) => {
                let items: Box<[Test]> = items.iter().map(|&n| self.reference(n)).collect();
                self.call(Arc::new(move |value: &Value, slots: &Slots| match value {
                    Value::Array(values) => {
                        values.len() == items.len()
                            && items.iter().zip(values).all(|(t, v)| t.run(v, slots))
                    }
                    _ => false,
                }))
            }
            Node::Object {
                required,
                optional,
                exact,
            } => {
                let required = self.fields(required);
                let optional = self.fields(optional);
                match exact.clone() {
                    None if optional.is_empty() => {
                        self.call(Arc::new(move |value: &Value, slots: &Slots| match value {
                            Value::Object(map) => has_required(map, &required, slots),
                            _ => false,
                        }))
                    }
                    None => self.call(Arc::new(move |value: &Value, slots: &Slots| match value {
                        Value::Object(map) => {
                            has_required(map, &required, slots)
                                && has_optional(map, &optional, slots)
                        }
                        _ => false,
                    })),
                    Some(keys) => {
                        self.call(Arc::new(move |value: &Value, slots: &Slots| match value {
                            Value::Object(map) => {
                                map.keys().all(|k| keys.contains(k.as_str()))
                                    && has_required(map, &required, slots)
                                    && has_optional(map, &optional, slots)
                            }
                            _ => false,
                        }))
                    }
                }
            }
            Node::Record(inner) => {
                let inner = self.reference(*inner);
                self.call(Arc::new(move |value: &Value, slots: &Slots| match value {
                    Value::Object(map) => map.values().all(|v| inner.run(v, slots)),
                    _ => false,
                }))
            }
            Node::Array(inner) => {
                let inner = self.reference(*inner);
                self.call(Arc::new(move |value: &Value, slots: &Slots| match value {
                    Value::Array(values) => values.iter().all(|v| inner.run(v, slots)),
                    _ => false,
                }))
            }
            Node::Custom(predicate) => {
                let predicate = predicate.clone();
                self.call(Arc::new(move |value: &Value, _: &Slots| predicate.call(value)))
            }
        }
    }
}

#[inline]
fn has_required(map: &Map, fields: &[(Box<str>, Test)], slots: &Slots) -> bool {
    fields
        .iter()
        .all(|(key, test)| map.get(&**key).is_some_and(|v| test.run(v, slots)))
}

#[inline]
fn has_optional(map: &Map, fields: &[(Box<str>, Test)], slots: &Slots) -> bool {
    fields
        .iter()
        .all(|(key, test)| map.get(&**key).is_none_or(|v| test.run(v, slots)))
}

// ============================================================================
// BUILDER
// ============================================================================

struct Builder {
    options: CompileOptions,
    nodes: Vec<Node>,
    bindings: HashMap<RecursionId, NodeId>,
}

impl Builder {
    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn lower(&mut self, schema: &Schema) -> NodeId {
        match schema {
            Schema::Unknown => self.push(Node::Any),
            Schema::Never => self.push(Node::Nothing),
            Schema::Primitive(kind) => self.push(Node::Kinds(KindSet::only(*kind))),
            Schema::Literal(literal) => self.push(Node::Equals(literal.clone())),
            Schema::Union(members) => self.lower_union(members),
            Schema::Tuple(items) => {
                let items = items.iter().map(|s| self.lower(s)).collect();
                self.push(Node::Tuple(items))
            }
            Schema::Object { fields, exact } => {
                let exact = exact.then(|| fields.iter().map(|(k, _)| Box::from(&**k)).collect());
                // All fields start out required; `finalize` classifies them.
                let required = fields
                    .iter()
                    .map(|(key, s)| (Box::from(&**key), self.lower(s)))
                    .collect();
                self.push(Node::Object {
                    required,
                    optional: Box::default(),
                    exact,
                })
            }
            Schema::Record(inner) => {
                let inner = self.lower(inner);
                if self.is_trivial(inner) {
                    self.push(Node::Kinds(KindSet::only(Kind::Object)))
                } else {
                    self.push(Node::Record(inner))
                }
            }
            Schema::Array(inner) => {
                let inner = self.lower(inner);
                if self.is_trivial(inner) {
                    self.push(Node::Kinds(KindSet::only(Kind::Array)))
                } else {
                    self.push(Node::Array(inner))
                }
            }
            Schema::Recursive { id, body } => {
                let slot = self.push(Node::Unbound);
                self.bindings.insert(*id, slot);
                let body = self.lower(body);
                self.nodes[slot.0] = if body == slot {
                    Node::Unbound
                } else if self.bindings.values().any(|&bound| bound == body) {
                    // The body is another binding, possibly still unfinished:
                    // point at it instead of copying its current state.
                    Node::Union {
                        kinds: KindSet::EMPTY,
                        literals: Box::default(),
                        rest: Box::new([body]),
                    }
                } else {
                    self.nodes[body.0].clone()
                };
                slot
            }
            Schema::Ref { id, target } => match self.bindings.get(id) {
                Some(&slot) => slot,
                None => self.push(Node::Custom(target.clone())),
            },
            Schema::Custom(predicate) => self.push(Node::Custom(predicate.clone())),
        }
    }

    fn is_trivial(&self, id: NodeId) -> bool {
        self.options.prune_trivial_fields() && matches!(self.nodes[id.0], Node::Any)
    }

    fn lower_union(&mut self, members: &[Schema]) -> NodeId {
        if !self.options.fold_kinds() {
            let rest = members.iter().map(|m| self.lower(m)).collect();
            return self.push(Node::Union {
                kinds: KindSet::EMPTY,
                literals: Box::default(),
                rest,
            });
        }

        let mut flat = Vec::new();
        flatten(members, &mut flat);

        let mut kinds = KindSet::EMPTY;
        let mut literals = Vec::new();
        let mut rest = Vec::new();
        for member in flat {
            match member {
                Schema::Unknown => return self.push(Node::Any),
                Schema::Never => {}
                Schema::Primitive(kind) => kinds.insert(*kind),
                Schema::Literal(literal) => literals.push(literal.clone()),
                other => rest.push(self.lower(other)),
            }
        }
        literals.retain(|l| !kinds.contains(l.kind()));

        if kinds.is_empty() && literals.is_empty() {
            match rest.as_slice() {
                [] => return self.push(Node::Nothing),
                [only] => return *only,
                _ => {}
            }
        }
        if literals.is_empty() && rest.is_empty() {
            return self.push(Node::Kinds(kinds));
        }
        if kinds.is_empty() && rest.is_empty() && literals.len() == 1 {
            if let Some(literal) = literals.pop() {
                return self.push(Node::Equals(literal));
            }
        }

        self.push(Node::Union {
            kinds,
            literals: literals.into_boxed_slice(),
            rest: rest.into_boxed_slice(),
        })
    }
}

fn flatten<'s>(members: &'s [Schema], out: &mut Vec<&'s Schema>) {
    for member in members {
        match member {
            Schema::Union(inner) => flatten(inner, out),
            other => out.push(other),
        }
    }
}
