use dwellsim_power_models::power_model::{ConstantPowerModel, StatePowerModel, TabularPowerModel};

#[test]
fn test_constant_model() {
    let model = ConstantPowerModel::new(1.5);

    assert_eq!(model.get_power(0), 1.5);
    assert_eq!(model.get_power(42), 1.5);
    assert_eq!(model.get_power(-1), 1.5);
}

#[test]
fn test_tabular_model() {
    let model = TabularPowerModel::new(1.)
        .with_state(0, 1.0357)
        .with_state(1, 1.0215)
        .with_state(2, 1.0284);

    assert_eq!(model.get_power(0), 1.0357);
    assert_eq!(model.get_power(1), 1.0215);
    assert_eq!(model.get_power(2), 1.0284);

    // undefined states resolve to the default
    assert_eq!(model.get_power(3), 1.);
    assert_eq!(model.get_power(100), 1.);
    assert_eq!(model.get_power(-1), 1.);

    assert_eq!(model.states().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(model.default_power(), 1.);
}

#[test]
fn test_boxed_model_clone() {
    let model: Box<dyn StatePowerModel> = Box::new(TabularPowerModel::new(1.).with_state(5, 1.0925));
    let copy = model.clone();

    assert_eq!(copy.get_power(5), 1.0925);
    assert_eq!(copy.get_power(6), 1.);
}
