use enyaq::capability::Capability;
use enyaq::charging::SkodaChargingState;
use enyaq::vehicle::{FreshArgs, Vehicle, VehicleKind, VehicleSource};

fn fresh(kind: VehicleKind, vin: &str) -> Vehicle {
    Vehicle::new(
        kind,
        VehicleSource::Fresh(FreshArgs {
            vin: Some(vin.to_string()),
            connector_id: Some("skoda".to_string()),
            support_images: false,
        }),
    )
}

#[test]
fn clone_moves_capabilities_and_reparents_them() {
    let mut origin = fresh(VehicleKind::Electric, "TMBJB9NY6RF000010");
    let owner = origin.owner_ref();
    origin
        .capabilities
        .add(Capability::new("charging", owner.clone()).unwrap());
    let caps_instance = origin.capabilities.instance_id();
    let origin_owner = origin.owner_ref();

    let cloned = Vehicle::new(VehicleKind::Electric, VehicleSource::Origin(Box::new(origin)));

    // same underlying registry, new owner
    assert_eq!(cloned.capabilities.instance_id(), caps_instance);
    assert_eq!(cloned.capabilities.owner(), &cloned.owner_ref());
    assert_ne!(cloned.capabilities.owner(), &origin_owner);

    // contained capabilities are re-parented too
    let cap = cloned.capabilities.get("charging").unwrap();
    assert_eq!(cap.owner(), &cloned.owner_ref());
}

#[test]
fn clone_moves_climatization_tree() {
    let mut origin = fresh(VehicleKind::Combustion, "TMBJB9NY6RF000011");
    origin.climatization.settings.target_temperature_c = Some(21.5);
    let clima_instance = origin.climatization.instance_id();

    let cloned = Vehicle::new(
        VehicleKind::Combustion,
        VehicleSource::Origin(Box::new(origin)),
    );

    assert_eq!(cloned.climatization.instance_id(), clima_instance);
    assert_eq!(cloned.climatization.owner(), &cloned.owner_ref());
    assert_eq!(cloned.climatization.settings.target_temperature_c, Some(21.5));
}

#[test]
fn electric_clone_adopts_charging_from_electric_origin() {
    let mut origin = fresh(VehicleKind::Electric, "TMBJB9NY6RF000012");
    let charging = origin.charging.as_mut().unwrap();
    charging.record_state(SkodaChargingState::Charging);
    let charging_instance = origin.charging.as_ref().unwrap().instance_id();

    let cloned = Vehicle::new(VehicleKind::Electric, VehicleSource::Origin(Box::new(origin)));

    let charging = cloned.charging.as_ref().unwrap();
    assert_eq!(charging.instance_id(), charging_instance);
    assert_eq!(charging.owner(), &cloned.owner_ref());
    assert_eq!(charging.raw_state, Some(SkodaChargingState::Charging));
}

#[test]
fn electric_clone_from_combustion_origin_has_no_charging() {
    let origin = fresh(VehicleKind::Combustion, "TMBJB9NY6RF000013");
    let cloned = Vehicle::new(VehicleKind::Electric, VehicleSource::Origin(Box::new(origin)));
    assert!(cloned.charging.is_none());
}

#[test]
fn combustion_clone_drops_charging_even_from_electric_origin() {
    let origin = fresh(VehicleKind::Electric, "TMBJB9NY6RF000014");
    let cloned = Vehicle::new(
        VehicleKind::Combustion,
        VehicleSource::Origin(Box::new(origin)),
    );
    assert!(cloned.charging.is_none());
}

#[test]
fn hybrid_gets_charging_on_fresh_construction() {
    let vehicle = fresh(VehicleKind::Hybrid, "TMBJB9NY6RF000015");
    assert!(vehicle.charging.is_some());
}

#[test]
fn manufacturer_is_set_on_every_path() {
    for kind in [
        VehicleKind::Electric,
        VehicleKind::Combustion,
        VehicleKind::Hybrid,
    ] {
        let fresh_vehicle = fresh(kind, "TMBJB9NY6RF000016");
        assert_eq!(fresh_vehicle.manufacturer(), "Škoda");

        let cloned = Vehicle::new(kind, VehicleSource::Origin(Box::new(fresh_vehicle)));
        assert_eq!(cloned.manufacturer(), "Škoda");
    }
}

#[test]
fn clone_carries_identity_fields() {
    let mut origin = fresh(VehicleKind::Electric, "TMBJB9NY6RF000017");
    origin.license_plate = Some("1AB 2345".to_string());

    let cloned = Vehicle::new(VehicleKind::Electric, VehicleSource::Origin(Box::new(origin)));
    assert_eq!(cloned.vin(), Some("TMBJB9NY6RF000017"));
    assert_eq!(cloned.license_plate.as_deref(), Some("1AB 2345"));
    assert_eq!(cloned.connector_id(), Some("skoda"));
}

#[test]
fn image_store_follows_the_config_flag() {
    let mut with_images = Vehicle::new(
        VehicleKind::Electric,
        VehicleSource::Fresh(FreshArgs {
            vin: Some("TMBJB9NY6RF000018".to_string()),
            connector_id: None,
            support_images: true,
        }),
    );
    assert!(with_images.images_supported());
    assert!(with_images.set_image("exterior", vec![1, 2, 3]));
    assert_eq!(with_images.image("exterior"), Some(&[1u8, 2, 3][..]));

    // the store moves with the clone
    let cloned = Vehicle::new(
        VehicleKind::Electric,
        VehicleSource::Origin(Box::new(with_images)),
    );
    assert!(cloned.images_supported());
    assert_eq!(cloned.image("exterior"), Some(&[1u8, 2, 3][..]));

    let mut without = fresh(VehicleKind::Electric, "TMBJB9NY6RF000019");
    assert!(!without.images_supported());
    assert!(!without.set_image("exterior", vec![1]));
}
