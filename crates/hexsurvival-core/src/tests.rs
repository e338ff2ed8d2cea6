#[cfg(test)]
mod tests {
    use glam::DVec2;

    use crate::commands::PlayerCommand;
    use crate::config::{ConfigError, Tuning};
    use crate::enums::*;
    use crate::events::SimEvent;
    use crate::state::SimSnapshot;
    use crate::types::{AxialHex, SimTime, WorldPoint};

    #[test]
    fn test_axial_hex_cube_invariant() {
        for hex in [
            AxialHex::new(0, 0),
            AxialHex::new(3, -7),
            AxialHex::new(-12, 5),
        ] {
            assert_eq!(hex.q + hex.r + hex.s(), 0, "cube invariant broken for {hex}");
        }
    }

    #[test]
    fn test_axial_hex_arithmetic() {
        let a = AxialHex::new(2, -1);
        let b = AxialHex::new(-1, 3);
        assert_eq!(a + b, AxialHex::new(1, 2));
        assert_eq!(a - b, AxialHex::new(3, -4));
        assert_eq!(a - a, AxialHex::ZERO);
    }

    #[test]
    fn test_world_point_distance() {
        let a = WorldPoint::new(0.0, 0.0);
        let b = WorldPoint::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((a.distance_sq_to(&b) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_world_point_vector_ops() {
        let p = WorldPoint::new(1.0, 2.0);
        let moved = p + DVec2::new(0.5, -1.0);
        assert_eq!(moved, WorldPoint::new(1.5, 1.0));
        assert_eq!(moved - p, DVec2::new(0.5, -1.0));
        assert_eq!(WorldPoint::from(p.to_vec()), p);
    }

    #[test]
    fn test_angle_to_east_is_zero() {
        let a = WorldPoint::ORIGIN;
        assert!(a.angle_to(&WorldPoint::new(10.0, 0.0)).abs() < 1e-12);
        let north = a.angle_to(&WorldPoint::new(0.0, 10.0));
        assert!((north - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_sim_time_variable_dt() {
        let mut t = SimTime::default();
        t.advance(0.016);
        t.advance(0.034);
        assert_eq!(t.tick, 2);
        assert!((t.elapsed_secs - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_actor_kind_enemy_flag() {
        assert!(!ActorKind::Player.is_enemy());
        assert!(ActorKind::Zombie.is_enemy());
        assert!(ActorKind::Vehicle.is_enemy());
    }

    #[test]
    fn test_command_serde_tagged() {
        let cmd = PlayerCommand::SetPlayerGeo {
            lat: 52.52,
            lon: 13.405,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"SetPlayerGeo\""), "got {json}");

        let parsed: PlayerCommand =
            serde_json::from_str(r#"{"type":"KillActor","actor_id":42}"#).unwrap();
        assert!(matches!(parsed, PlayerCommand::KillActor { actor_id: 42 }));
    }

    #[test]
    fn test_event_serde_tagged() {
        let event = SimEvent::ContentSpawned {
            hex: AxialHex::new(1, -1),
            entity_id: 7,
            content: ContentKind::Pickup(PickupKind::Ammo),
            position: WorldPoint::new(10.0, 20.0),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"ContentSpawned\""));
        let back: SimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_snapshot_default_serializes() {
        let snapshot = SimSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"phase\":\"Idle\""));
        assert!(json.contains("\"player\":null"));
    }

    // ---- Configuration ----

    #[test]
    fn test_default_tuning_is_valid() {
        Tuning::default().validate().unwrap();
    }

    #[test]
    fn test_default_tuning_matches_documented_values() {
        let t = Tuning::default();
        assert_eq!(t.hex.hex_radius * t.hex.scale, 176.0);
        assert_eq!(t.waves.gap_secs, 60.0);
        assert_eq!(t.waves.wave_secs, 30.0);
        assert!((t.content.total_weight() - 1.0).abs() < 1e-12);
        assert!((t.content.weight_enemy - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json_str(r#"{"waves": {"gap_secs": 10.0}, "hex": {"scale": 4.0}}"#)
            .unwrap();
        assert_eq!(t.waves.gap_secs, 10.0);
        assert_eq!(t.waves.wave_secs, 30.0, "unset field keeps its default");
        assert_eq!(t.hex.scale, 4.0);
        assert_eq!(t.hex.hex_radius, 22.0);
        assert_eq!(t.actors.for_kind(ActorKind::Zombie), Tuning::default().actors.zombie);
    }

    #[test]
    fn test_partial_actor_profile_keeps_kind_defaults() {
        let t = Tuning::from_json_str(r#"{"actors":{"zombie":{"speed":10.0}}}"#).unwrap();
        let defaults = Tuning::default().actors;
        assert_eq!(t.actors.zombie.speed, 10.0);
        assert_eq!(t.actors.zombie.radius, defaults.zombie.radius);
        assert_eq!(t.actors.zombie.direction_damp, defaults.zombie.direction_damp);
        assert_eq!(t.actors.player, defaults.player);
        assert_eq!(t.actors.vehicle, defaults.vehicle);
    }

    #[test]
    fn test_actor_profiles_serialize_round_trip() {
        let mut t = Tuning::default();
        t.actors.vehicle.avoidance_weight = 3.5;
        let json = serde_json::to_string(&t).unwrap();
        let back = Tuning::from_json_str(&json).unwrap();
        assert_eq!(back.actors.vehicle, t.actors.vehicle);
    }

    #[test]
    fn test_invalid_decay_rejected() {
        let err = Tuning::from_json_str(r#"{"steering": {"pushback_decay_per_tick": 1.5}}"#)
            .unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => {
                assert_eq!(field, "steering.pushback_decay_per_tick")
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_spawn_gap_floor_above_base_rejected() {
        let mut t = Tuning::default();
        t.waves.spawn_gap_floor_secs = 10.0;
        assert!(matches!(
            t.validate(),
            Err(ConfigError::Invalid { field: "waves.spawn_gap_base_secs", .. })
        ));
    }

    #[test]
    fn test_zero_content_weights_rejected() {
        let mut t = Tuning::default();
        t.content.weight_enemy = 0.0;
        t.content.weight_health = 0.0;
        t.content.weight_ammo = 0.0;
        t.content.weight_weapon = 0.0;
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse config"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load(std::path::Path::new("/nonexistent/tuning.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
