//! End-to-end generation passes: naming, reconciliation and rendering
//! against reflection facts of a previous build.

use weaver_codegen::{
    BaseType, ConstructorBuilder, Declare, FieldBuilder, GenerateError, GenerationContext,
    GenerationSettings, MethodBuilder, NamespaceBuilder, Parameter, Pipeline, PropertyBuilder,
    ScriptBuilder, TypeBuilder, TypeKind,
    definitions::{ConstantsContent, ConstantsScript},
    testing::compile_snapshot,
};
use weaver_core::{Modifiers, TypeName};
use weaver_reflect::{
    ReflectedAssembly, ReflectedConstructor, ReflectedField, ReflectedMember, ReflectedType,
    SnapshotCache,
};

fn layers(values: &[(&str, i32)]) -> ScriptBuilder {
    ConstantsScript::new(
        "Layers",
        ConstantsContent::Layers(values.iter().map(|(n, i)| (n.to_string(), *i)).collect()),
    )
    .namespace("Weaver")
    .build()
}

fn compiled_layers(fields: Vec<ReflectedField>) -> SnapshotCache {
    let mut ty = ReflectedType::new(
        TypeName::new(Some("Weaver"), "Layers"),
        Modifiers::PUBLIC_STATIC,
    );
    for field in fields {
        ty = ty.member(field);
    }
    SnapshotCache::new(ReflectedAssembly::new(vec![ty]))
}

fn layer(name: &str, index: i32) -> ReflectedField {
    ReflectedField::new(name, TypeName::int(), Modifiers::PUBLIC_CONST).value(index)
}

fn run<'a>(
    script: ScriptBuilder,
    settings: GenerationSettings,
    cache: &'a mut SnapshotCache,
) -> GenerationContext<'a> {
    Pipeline::new()
        .run(script, settings, cache)
        .expect("pipeline should succeed")
}

fn reasons(ctx: &GenerationContext<'_>) -> Vec<String> {
    ctx.rebuild_reasons().map(|d| d.message.clone()).collect()
}

#[test]
fn test_new_field_added() {
    let mut cache = compiled_layers(vec![layer("Default", 0)]);
    let ctx = run(
        layers(&[("Default", 0), ("Water", 4)]),
        GenerationSettings::default(),
        &mut cache,
    );

    assert!(ctx.should_rebuild);
    assert_eq!(
        reasons(&ctx),
        vec!["a new member should be added: field Water"]
    );
}

#[test]
fn test_field_type_changed() {
    let mut script = ScriptBuilder::new("Layers");
    let ns = script.add_root(NamespaceBuilder::new("Weaver"));
    let ty = script.add(ns, TypeBuilder::static_class("Layers"));
    script.add(
        ty,
        FieldBuilder::new("Foo", TypeName::float()).modifiers(Modifiers::PUBLIC_STATIC),
    );
    let mut cache = compiled_layers(vec![ReflectedField::new(
        "Foo",
        TypeName::int(),
        Modifiers::PUBLIC_STATIC,
    )]);

    let ctx = run(script, GenerationSettings::default(), &mut cache);

    assert!(ctx.should_rebuild);
    assert!(reasons(&ctx).iter().any(|r| r.contains("Foo is not a float field")));
}

#[test]
fn test_no_changes() {
    let mut cache = compiled_layers(vec![layer("Default", 0), layer("Water", 4)]);
    let ctx = run(
        layers(&[("Default", 0), ("Water", 4)]),
        GenerationSettings::default(),
        &mut cache,
    );

    assert!(!ctx.should_rebuild, "unexpected reasons: {:?}", reasons(&ctx));
    assert!(ctx.diagnostics.is_empty());
    let script = ctx.into_script();
    let ty = script.children(script.roots()[0])[0];
    assert!(script.type_def(ty).expect("type").obsolete_members().is_empty());
}

#[test]
fn test_value_changed() {
    let mut cache = compiled_layers(vec![layer("Water", 3)]);
    let ctx = run(
        layers(&[("Water", 4)]),
        GenerationSettings::default(),
        &mut cache,
    );

    assert_eq!(reasons(&ctx), vec!["Water value changed from 3 to 4"]);
}

#[test]
fn test_unresolved_collision_suppresses_rendering() {
    let script = ConstantsScript::new(
        "Tags",
        ConstantsContent::Tags(vec!["!".into(), "?".into()]),
    )
    .build();
    let mut cache = SnapshotCache::empty();

    let ctx = run(script, GenerationSettings::default(), &mut cache);

    assert_eq!(ctx.error_count(), 1);
    assert_eq!(
        ctx.render(),
        Err(GenerateError::NamingConflicts {
            script: "Tags".into(),
            conflicts: vec!["naming conflict: '!' and '?' both resolve to '_'".into()],
        })
    );
}

#[test]
fn test_fallback_names_distinct() {
    let script = ConstantsScript::new(
        "Tags",
        ConstantsContent::Tags(vec!["Main Camera".into(), "MainCamera".into()]),
    )
    .build();
    let mut cache = SnapshotCache::empty();

    let ctx = run(script, GenerationSettings::default(), &mut cache);
    let rendered = ctx.render().expect("no conflicts");

    assert!(rendered.contains("public const string Main_Camera = \"Main Camera\";"));
    assert!(rendered.contains("public const string MainCamera = \"MainCamera\";"));
    let script = ctx.into_script();
    let fields = script.children(script.roots()[0]);
    assert!(fields.iter().any(|f| script.element(*f).is_fallback_name()));
}

#[test]
fn test_implicit_constructors_exempt() {
    let mut script = ScriptBuilder::new("Pool");
    let ty = script.add_root(TypeBuilder::new("Pool"));
    script.add(
        ty,
        FieldBuilder::new("Shared", TypeName::int())
            .modifiers(Modifiers::PUBLIC_STATIC)
            .value(3),
    );
    let compiled = ReflectedType::new(TypeName::new(None, "Pool"), Modifiers::PUBLIC)
        .member(
            ReflectedField::new("Shared", TypeName::int(), Modifiers::PUBLIC_STATIC).value(3),
        )
        .member(ReflectedConstructor::new(Modifiers::PUBLIC))
        .member(ReflectedConstructor::new(Modifiers::PRIVATE | Modifiers::STATIC));
    let mut cache = SnapshotCache::new(ReflectedAssembly::new(vec![compiled]));

    let ctx = run(script, GenerationSettings::default(), &mut cache);

    assert!(!ctx.should_rebuild, "unexpected reasons: {:?}", reasons(&ctx));
    let script = ctx.into_script();
    assert!(script.type_def(ty).expect("type").obsolete_members().is_empty());
}

#[test]
fn test_obsolete_retention_round_trip() {
    let mut cache = compiled_layers(vec![layer("Water", 4), layer("Lava", 9)]);
    let ctx = run(
        layers(&[("Water", 4)]),
        GenerationSettings::default(),
        &mut cache,
    );

    assert!(ctx.should_rebuild);
    assert_eq!(reasons(&ctx), vec!["field Lava is now obsolete"]);
    let rendered = ctx.render().expect("no conflicts");
    let stub = "\
        #if UNITY_EDITOR
        #region Obsolete Members

        [System.Obsolete(\"This member is no longer generated. Remove any references to it.\")]
        public static int Lava => throw new System.NotImplementedException(\"This member is no longer generated. Remove any references to it.\");

        #endregion
        #endif
";
    assert!(rendered.contains(stub), "stub missing from:\n{}", rendered);
    assert_eq!(rendered.matches("Lava").count(), 1);

    let script = ctx.into_script();
    let ty = script.children(script.roots()[0])[0];
    let obsolete = script.type_def(ty).expect("type").obsolete_members();
    assert_eq!(obsolete.len(), 1);
    assert_eq!(obsolete[0].name(), "Lava");

    // The next build reports the stub as an obsolete property; keeping it
    // around needs no further rebuild.
    let mut cache = SnapshotCache::new(compile_snapshot(&script));
    let ctx = run(
        layers(&[("Water", 4)]),
        GenerationSettings::default(),
        &mut cache,
    );
    assert!(!ctx.should_rebuild, "unexpected reasons: {:?}", reasons(&ctx));
    let script = ctx.into_script();
    let ty = script.children(script.roots()[0])[0];
    let obsolete = script.type_def(ty).expect("type").obsolete_members();
    assert!(matches!(&obsolete[..], [ReflectedMember::Property(p)] if p.name == "Lava" && p.is_obsolete));
}

#[test]
fn test_removed_member_added_back() {
    let mut cache = compiled_layers(vec![layer("Water", 4), layer("Lava", 9)]);
    let removed = run(
        layers(&[("Water", 4)]),
        GenerationSettings::default(),
        &mut cache,
    );
    let mut cache = SnapshotCache::new(compile_snapshot(&removed.into_script()));

    let ctx = run(
        layers(&[("Water", 4), ("Lava", 9)]),
        GenerationSettings::default(),
        &mut cache,
    );

    assert!(ctx.should_rebuild);
    assert_eq!(reasons(&ctx), vec!["Lava is no longer obsolete"]);
    let rendered = ctx.render().expect("no conflicts");
    assert_eq!(rendered.matches(" Lava ").count(), 1, "{}", rendered);
    assert!(rendered.contains("public const int Lava = 9;"));
    assert!(!rendered.contains("Obsolete Members"));

    let mut cache = SnapshotCache::new(compile_snapshot(&ctx.into_script()));
    let ctx = run(
        layers(&[("Water", 4), ("Lava", 9)]),
        GenerationSettings::default(),
        &mut cache,
    );
    assert!(!ctx.should_rebuild, "unexpected reasons: {:?}", reasons(&ctx));
}

fn tags(values: &[&str]) -> ScriptBuilder {
    ConstantsScript::new(
        "Tags",
        ConstantsContent::Tags(values.iter().map(|v| v.to_string()).collect()),
    )
    .build()
}

#[test]
fn test_keyword_tag_round_trip() {
    let mut cache = SnapshotCache::empty();
    let first = run(tags(&["class", "Player"]), GenerationSettings::default(), &mut cache);
    assert!(first
        .render()
        .expect("no conflicts")
        .contains("public const string @class = \"class\";"));

    let compiled = compile_snapshot(&first.into_script());
    let tags_type = compiled.find_type("Tags").expect("compiled type");
    assert_eq!(tags_type.members[0].name(), "class");

    let mut cache = SnapshotCache::new(compiled.clone());
    let second = run(tags(&["class", "Player"]), GenerationSettings::default(), &mut cache);
    assert!(!second.should_rebuild, "unexpected reasons: {:?}", reasons(&second));

    let mut cache = SnapshotCache::new(compiled);
    let removed = run(tags(&["Player"]), GenerationSettings::default(), &mut cache);
    assert_eq!(reasons(&removed), vec!["field class is now obsolete"]);
    assert!(removed
        .render()
        .expect("no conflicts")
        .contains("public static string @class => throw"));
}

#[test]
fn test_removed_member_without_retention() {
    let mut cache = compiled_layers(vec![layer("Water", 4), layer("Lava", 9)]);
    let settings = GenerationSettings {
        retain_obsolete: false,
        ..GenerationSettings::default()
    };
    let ctx = run(layers(&[("Water", 4)]), settings, &mut cache);

    assert_eq!(reasons(&ctx), vec!["field Lava should be removed"]);
    assert!(!ctx.render().expect("no conflicts").contains("Lava"));
}

#[test]
fn test_determinism() {
    let build = || {
        ConstantsScript::new(
            "Tags",
            ConstantsContent::Tags(vec![
                "Main Camera".into(),
                "MainCamera".into(),
                "Player".into(),
                "class".into(),
            ]),
        )
        .build()
    };

    let mut first_cache = SnapshotCache::empty();
    let first = run(build(), GenerationSettings::default(), &mut first_cache);
    let mut second_cache = SnapshotCache::empty();
    let second = run(build(), GenerationSettings::default(), &mut second_cache);

    assert_eq!(first.should_rebuild, second.should_rebuild);
    assert_eq!(first.diagnostics, second.diagnostics);
    assert_eq!(first.render(), second.render());
}

/// A script touching every element kind.
fn pool_script() -> ScriptBuilder {
    let mut script = ScriptBuilder::new("Pool");
    script.add_using("System.Collections.Generic");
    let ns = script.add_root(NamespaceBuilder::new("Game.Pooling"));

    let pool = script.add(
        ns,
        TypeBuilder::new("Pool")
            .base_type(BaseType::Explicit(TypeName::new(Some("Game"), "Service")))
            .comment("A fixed size pool."),
    );
    script.add(
        pool,
        ConstructorBuilder::new()
            .parameter(Parameter::new("size", TypeName::int()))
            .body("Resize(size)"),
    );
    let list = TypeName::new(Some("System.Collections.Generic"), "List").generic([TypeName::int()]);
    script.add(
        pool,
        FieldBuilder::new("Items", list.clone())
            .modifiers(Modifiers::PRIVATE | Modifiers::READONLY)
            .value(weaver_core::Literal::Null),
    );
    script.add(
        pool,
        PropertyBuilder::new("Count", TypeName::int()).getter("Items.Count"),
    );
    script.add(
        pool,
        PropertyBuilder::new("Size", TypeName::int())
            .auto_getter()
            .auto_setter()
            .setter_modifiers(Modifiers::PRIVATE)
            .region("State"),
    );
    script.add(
        pool,
        MethodBuilder::new("Resize", TypeName::void())
            .parameter(Parameter::new("size", TypeName::int()))
            .body("\nSize = size;\nItems.Capacity = size;")
            .region("State"),
    );
    let entry = script.add(
        pool,
        TypeBuilder::new("Entry").kind(TypeKind::Struct),
    );
    script.add(entry, FieldBuilder::new("Index", TypeName::int()));

    let defaults = script.add(ns, TypeBuilder::static_class("Defaults"));
    script.add(
        defaults,
        FieldBuilder::new("Capacity", TypeName::int())
            .modifiers(Modifiers::PUBLIC_STATIC)
            .value(16),
    );
    script.add(
        defaults,
        PropertyBuilder::new("Name", TypeName::string())
            .modifiers(Modifiers::PUBLIC_STATIC)
            .getter("\"Pool\"")
            .expected_value("Pool")
            .symbol("UNITY_EDITOR"),
    );
    script
}

#[test]
fn test_rendering_then_compiling_is_idempotent() {
    let settings = GenerationSettings {
        retain_obsolete: false,
        ..GenerationSettings::default()
    };

    let mut cache = SnapshotCache::empty();
    let first = run(pool_script(), settings.clone(), &mut cache);
    assert!(first.should_rebuild);
    assert!(!first.has_errors());
    let resolved = first.into_script();

    let mut cache = SnapshotCache::new(compile_snapshot(&resolved));
    let second = run(pool_script(), settings, &mut cache);

    assert!(!second.should_rebuild, "unexpected reasons: {:?}", reasons(&second));
    assert_eq!(second.warning_count(), 0);
}

#[test]
fn test_base_type_change() {
    let mut cache = SnapshotCache::empty();
    let first = run(pool_script(), GenerationSettings::default(), &mut cache);
    let mut compiled = compile_snapshot(&first.into_script());
    compiled.types[0].base_type = None;

    let mut cache = SnapshotCache::new(compiled);
    let second = run(pool_script(), GenerationSettings::default(), &mut cache);

    assert_eq!(
        reasons(&second),
        vec!["Pool does not derive from Game.Service"]
    );
}
