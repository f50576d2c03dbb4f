//! Property-based tests for vigil-guard.

use std::sync::LazyLock;

use proptest::prelude::*;
use vigil_guard::prelude::*;

// ============================================================================
// GENERATORS
// ============================================================================

static SHARED_SYMBOL: LazyLock<Symbol> = LazyLock::new(|| Symbol::new("shared"));

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        prop_oneof![
            Just(0.0),
            Just(-0.0),
            Just(1.0),
            Just(f64::NAN),
            Just(f64::INFINITY),
            any::<f64>(),
        ]
        .prop_map(Value::Number),
        (-2i128..2).prop_map(Value::BigInt),
        "[abc]{0,2}".prop_map(Value::String),
        Just(Value::Symbol(SHARED_SYMBOL.clone())),
        Just(Value::function("f")),
    ]
}

/// Arbitrary values; object keys come from a small alphabet so they collide
/// with the keys the schemas below ask for.
fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[abcd]", inner), 0..4).prop_map(Value::object),
        ]
    })
}

/// A guard description that can be turned into a real guard at runtime.
#[derive(Debug, Clone)]
enum Desc {
    Null,
    Undefined,
    Boolean,
    Number,
    String,
    Unknown,
    Never,
    Literal(Literal),
    Optional(Box<Desc>),
    Nullable(Box<Desc>),
    Union(Vec<Desc>),
    Tuple(Vec<Desc>),
    Object(Vec<(String, Desc)>, bool),
    Record(Box<Desc>),
    Array(Box<Desc>),
    Json,
    /// Back-edge to the nearest enclosing `Recursive`.
    This,
    Recursive(Box<Desc>),
}

fn desc_leaf() -> impl Strategy<Value = Desc> {
    prop_oneof![
        Just(Desc::Null),
        Just(Desc::Undefined),
        Just(Desc::Boolean),
        Just(Desc::Number),
        Just(Desc::String),
        Just(Desc::Unknown),
        Just(Desc::Never),
        Just(Desc::Json),
        prop_oneof![
            Just(Literal::Null),
            Just(Literal::Undefined),
            Just(Literal::from("a")),
            Just(Literal::from(1)),
            Just(Literal::from(true)),
            Just(Literal::Number(f64::NAN)),
        ]
        .prop_map(Desc::Literal),
    ]
}

fn desc() -> impl Strategy<Value = Desc> {
    let plain = desc_leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|d| Desc::Optional(Box::new(d))),
            inner.clone().prop_map(|d| Desc::Nullable(Box::new(d))),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Desc::Union),
            prop::collection::vec(inner.clone(), 0..3).prop_map(Desc::Tuple),
            (prop::collection::vec(("[abc]", inner.clone()), 0..4), any::<bool>())
                .prop_map(|(fields, exact)| Desc::Object(fields, exact)),
            inner.clone().prop_map(|d| Desc::Record(Box::new(d))),
            inner.prop_map(|d| Desc::Array(Box::new(d))),
        ]
    })
    .boxed();

    prop_oneof![
        3 => plain.clone(),
        1 => (plain.clone(), plain).prop_map(|(base, other)| {
            // Back-edges only below a container, so every definition has a base case.
            Desc::Recursive(Box::new(Desc::Union(vec![
                base,
                Desc::Array(Box::new(Desc::This)),
                Desc::Object(vec![("a".into(), Desc::This), ("b".into(), other)], false),
            ])))
        }),
    ]
}

fn build(desc: &Desc, this: Option<&SelfRef<()>>) -> BoxGuard<()> {
    let all = |items: &[Desc]| items.iter().map(|d| build(d, this)).collect::<Vec<_>>();
    match desc {
        Desc::Null => null().boxed(),
        Desc::Undefined => undefined().boxed(),
        Desc::Boolean => boolean().map(|_| ()).boxed(),
        Desc::Number => number().map(|_| ()).boxed(),
        Desc::String => string().map(|_| ()).boxed(),
        Desc::Unknown => unknown().map(|_| ()).boxed(),
        Desc::Never => never().map(|_| ()).boxed(),
        Desc::Literal(literal) => Equals::new(literal.clone()).map(|_| ()).boxed(),
        Desc::Optional(inner) => build(inner, this).optional().map(|_| ()).boxed(),
        Desc::Nullable(inner) => build(inner, this).nullable().map(|_| ()).boxed(),
        Desc::Union(members) => any_of(all(members)).boxed(),
        Desc::Tuple(items) => tuple(all(items)).map(|_| ()).boxed(),
        Desc::Object(fields, exact) => {
            let shape: Vec<_> = fields
                .iter()
                .map(|(key, d)| field(key.clone(), build(d, this)))
                .collect();
            let guard = if *exact { exact_object(shape) } else { object(shape) };
            guard.map(|_| ()).boxed()
        }
        Desc::Record(inner) => record(build(inner, this)).map(|_| ()).boxed(),
        Desc::Array(inner) => array(build(inner, this)).map(|_| ()).boxed(),
        Desc::Json => json().map(|_| ()).boxed(),
        Desc::This => match this {
            Some(back) => back.clone().boxed(),
            None => never().map(|_| ()).boxed(),
        },
        Desc::Recursive(body) => recursive(|back| build(body, Some(&back))).boxed(),
    }
}

fn all_options() -> [CompileOptions; 4] {
    [
        CompileOptions::new(),
        CompileOptions::new().with_fold_kinds(false),
        CompileOptions::new().with_prune_trivial_fields(false),
        CompileOptions::new()
            .with_fold_kinds(false)
            .with_prune_trivial_fields(false),
    ]
}

// ============================================================================
// COMPILED / INTERPRETED EQUIVALENCE
// ============================================================================

fn fixed_guard() -> impl Guard + Clone + 'static {
    object((
        field("a", string()),
        field("b", number().optional()),
        field(
            "c",
            array(union((boolean(), null(), literal("a")))).optional_nullable(),
        ),
        field("d", tuple((unknown(), string().nullable())).optional()),
        field("j", json().optional()),
    ))
}

/// Values shaped like `fixed_guard`'s objects, with each field sometimes
/// replaced by an arbitrary value, so both outcomes are frequent.
fn near_fixed() -> impl Strategy<Value = Value> {
    let a = prop_oneof![3 => "[abc]{0,3}".prop_map(Value::String), 1 => value()];
    let b = prop_oneof![
        1 => Just(Value::Undefined),
        2 => any::<f64>().prop_map(Value::Number),
        1 => value(),
    ];
    let c = prop_oneof![
        2 => prop::collection::vec(
            prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                Just(Value::from("a")),
                Just(Value::from("b")),
            ],
            0..4,
        )
        .prop_map(Value::Array),
        1 => value(),
    ];
    let d = prop_oneof![
        2 => (value(), prop_oneof![Just(Value::Null), Just(Value::from("s"))])
            .prop_map(|(x, y)| Value::array([x, y])),
        1 => value(),
    ];
    let j = value();
    let extra = value();

    (a, b, c, d, j, extra, prop::collection::vec(any::<bool>(), 6)).prop_map(
        |(a, b, c, d, j, extra, present)| {
            let entries = [("a", a), ("b", b), ("c", c), ("d", d), ("j", j), ("x", extra)];
            Value::object(
                entries
                    .into_iter()
                    .zip(present)
                    .filter(|(_, keep)| *keep)
                    .map(|(entry, _)| entry),
            )
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10_000))]

    #[test]
    fn compiled_matches_interpreted_on_fixed_schema(
        input in prop_oneof![3 => near_fixed(), 1 => value()],
    ) {
        let interpreted = fixed_guard();
        let compiled = interpreted.clone().compile();
        prop_assert_eq!(compiled.check(&input), interpreted.check(&input), "{}", input);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn compiled_matches_interpreted_on_generated_schemas(
        desc in desc(),
        inputs in prop::collection::vec(value(), 1..24),
    ) {
        let guard = build(&desc, None);
        for options in all_options() {
            let compiled = guard.clone().compile_with(options);
            for input in &inputs {
                prop_assert_eq!(
                    compiled.check(input),
                    guard.check(input),
                    "{:?} on {} with {:?}", desc, input, options
                );
            }
            prop_assert_eq!(compiled.accepts_missing(), guard.accepts_missing());
        }
    }

    #[test]
    fn key_classification_is_structural(desc in desc()) {
        let guard = build(&desc, None);
        prop_assert_eq!(guard.describe().accepts_missing(), guard.accepts_missing());
        prop_assert_eq!(guard.accepts_missing(), guard.check(&Value::Undefined));
    }

    #[test]
    fn parse_agrees_with_check(desc in desc(), input in value()) {
        let guard = build(&desc, None);
        prop_assert_eq!(guard.parse(&input).is_ok(), guard.check(&input));
    }

    #[test]
    fn check_is_idempotent(desc in desc(), input in value()) {
        let guard = build(&desc, None);
        let first = guard.check(&input);
        prop_assert_eq!(guard.check(&input), first);
        prop_assert_eq!(guard.check(&input.clone()), first);
    }
}

// ============================================================================
// COMBINATOR LAWS
// ============================================================================

proptest! {
    #[test]
    fn union_passes_iff_any_member_passes(a in desc(), b in desc(), input in value()) {
        let (ga, gb) = (build(&a, None), build(&b, None));
        let either = ga.clone().or(gb.clone());
        prop_assert_eq!(either.check(&input), ga.check(&input) || gb.check(&input));
    }

    #[test]
    fn optional_adds_exactly_undefined(d in desc(), input in value()) {
        let guard = build(&d, None);
        let widened = guard.clone().optional();
        prop_assert_eq!(
            widened.check(&input),
            input.is_undefined() || guard.check(&input)
        );
    }

    #[test]
    fn json_accepts_decoded_json(text in r#"\{"[ab]":\[(1|"x"|null|true)(,(2|\{\}|\[\]))?\]\}"#) {
        let decoded: serde_json::Value = serde_json::from_str(&text).unwrap();
        prop_assert!(json().check(&Value::from(decoded)));
    }

    #[test]
    fn accepted_json_converts_back(input in value()) {
        if json().check(&input) {
            prop_assert!(input.to_json().is_ok());
        }
    }
}
