//! Property-based tests for the diff engine.
//!
//! Random specifications with cross-referencing (and often cyclic) models are
//! compared against themselves and against small revisions.

use indexmap::IndexMap;
use proptest::prelude::*;
use swagger_diff::{
    model::{HttpMethod, Operation, Parameter, ParameterLocation, Path, Property, Response, Specification},
    SpecificationDiffEngine,
};

const MODEL_NAMES: [&str; 3] = ["Pet", "Owner", "Tag"];

fn property_strategy() -> impl Strategy<Value = Property> {
    prop_oneof![
        3 => prop::sample::select(vec!["string", "integer", "number", "boolean"]).prop_map(Property::typed),
        1 => prop::sample::select(MODEL_NAMES.to_vec()).prop_map(Property::reference),
    ]
}

fn properties_strategy() -> impl Strategy<Value = IndexMap<String, Property>> {
    prop::collection::vec(("[a-z]{1,8}", property_strategy()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    (
        prop::option::of("[A-Za-z ]{1,20}"),
        prop::collection::vec(("[a-z]{1,6}", any::<bool>()), 0..4),
        prop::sample::select(MODEL_NAMES.to_vec()),
    )
        .prop_map(|(summary, params, response_model)| {
            let mut operation = Operation::default();
            operation.summary = summary;
            for (name, required) in params {
                operation = operation.with_parameter(
                    Parameter::new(name, ParameterLocation::Query)
                        .with_type("string")
                        .with_required(required),
                );
            }
            operation.with_response(
                "200",
                Response::new("ok").with_schema(Property::reference(response_model)),
            )
        })
}

fn path_strategy() -> impl Strategy<Value = Path> {
    prop::collection::vec(
        (prop::sample::select(HttpMethod::ALL.to_vec()), operation_strategy()),
        1..4,
    )
    .prop_map(|ops| {
        ops.into_iter()
            .fold(Path::default(), |path, (method, op)| path.with_operation(method, op))
    })
}

fn spec_strategy() -> impl Strategy<Value = Specification> {
    (
        prop::collection::vec(properties_strategy(), MODEL_NAMES.len()),
        prop::collection::vec(("/[a-z]{1,8}", path_strategy()), 0..6),
    )
        .prop_map(|(models, paths)| {
            let mut spec = Specification::new();
            for (name, properties) in MODEL_NAMES.iter().zip(models) {
                let mut model = spec.new_model();
                model.properties = properties;
                spec.add_definition(*name, model);
            }
            for (url, path) in paths {
                spec.paths.insert(url, path);
            }
            spec
        })
}

fn engine() -> SpecificationDiffEngine {
    SpecificationDiffEngine::new().with_extensions(true)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn self_diff_is_empty_and_not_cosmetic(spec in spec_strategy()) {
        let copy = spec.clone();
        let result = engine().diff(&spec, &copy).expect("diff should succeed");

        prop_assert!(result.new_endpoints.is_empty());
        prop_assert!(result.missing_endpoints.is_empty());
        prop_assert!(result.changed_endpoints.is_empty());
        prop_assert!(!result.has_contract_changes());
        prop_assert!(!result.has_only_cosmetic_changes());
    }

    #[test]
    fn added_path_lists_each_operation_once(spec in spec_strategy(), path in path_strategy()) {
        let url = "/added-by-proptest";
        let operations = path.operations.len();
        let mut revised = spec.clone();
        revised.paths.insert(url.to_string(), path);

        let result = engine().diff(&spec, &revised).expect("diff should succeed");
        prop_assert_eq!(result.new_endpoints.len(), operations);
        prop_assert!(result.new_endpoints.iter().all(|e| e.path_url == url));
        prop_assert!(result.has_contract_changes());

        let reverse = engine().diff(&revised, &spec).expect("diff should succeed");
        prop_assert_eq!(reverse.missing_endpoints.len(), operations);
    }

    #[test]
    fn description_edits_are_never_contract(spec in spec_strategy(), text in "[a-z ]{1,30}") {
        let mut revised = spec.clone();
        for model in revised.definitions.values_mut() {
            for property in model.properties.values_mut() {
                if !property.is_reference() {
                    property.description = Some(text.clone());
                }
            }
        }
        for path in revised.paths.values_mut() {
            for operation in path.operations.values_mut() {
                operation.description = Some(text.clone());
            }
        }

        let result = engine().diff(&spec, &revised).expect("diff should succeed");
        prop_assert!(!result.has_contract_changes());
        prop_assert!(result.new_endpoints.is_empty());
        prop_assert!(result.missing_endpoints.is_empty());
    }

    #[test]
    fn cosmetic_and_contract_are_exclusive(a in spec_strategy(), b in spec_strategy()) {
        let result = engine().diff(&a, &b).expect("diff should succeed");
        prop_assert!(!(result.has_contract_changes() && result.has_only_cosmetic_changes()));
        if !result.has_changes() {
            prop_assert!(!result.has_only_cosmetic_changes());
        }
    }
}
