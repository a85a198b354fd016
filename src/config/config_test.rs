#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use crate::config::{new_test_config, Config, ConfigTrait};

    const VALID: &str = r#"
watchdog:
  env: prod
  logs:
    level: info
  period: 250ms
  shutdown_timeout: 3s
  checks:
    - name: db
      path: /var/run/db.heartbeat
      window: 10s
    - name: cache
      path: /var/run/cache.heartbeat
      window: 1m
"#;

    #[test]
    fn test_parse_valid_config() {
        let cfg = Config::parse(VALID).unwrap();

        assert!(cfg.is_prod());
        assert!(!cfg.is_dev());
        assert!(!cfg.is_debug());
        assert_eq!(cfg.logs().and_then(|l| l.level.as_deref()), Some("info"));
        assert_eq!(cfg.period(), Duration::from_millis(250));
        assert_eq!(cfg.shutdown_timeout(), Duration::from_secs(3));
        assert_eq!(cfg.checks().len(), 2);
        assert_eq!(cfg.checks()[1].name, "cache");
        assert_eq!(cfg.checks()[1].window, Duration::from_secs(60));
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::parse("watchdog:\n  env: dev\n  period: 1s\n").unwrap();

        assert!(cfg.is_dev());
        assert!(cfg.logs().is_none());
        assert!(cfg.checks().is_empty());
        assert_eq!(cfg.shutdown_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_zero_period_is_rejected() {
        let err = Config::parse("watchdog:\n  env: dev\n  period: 0s\n").unwrap_err();
        assert!(format!("{err:#}").contains("period"));
    }

    #[test]
    fn test_negative_window_is_rejected() {
        let yaml = "watchdog:\n  env: dev\n  period: 1s\n  checks:\n    - name: db\n      path: /tmp/db\n      window: -5s\n";
        assert!(Config::parse(yaml).is_err());
    }

    #[test]
    fn test_empty_check_name_is_rejected() {
        let yaml = "watchdog:\n  env: dev\n  period: 1s\n  checks:\n    - name: \"\"\n      path: /tmp/db\n      window: 5s\n";
        assert!(Config::parse(yaml).is_err());
    }

    #[test]
    fn test_debug_env() {
        let cfg = Config::parse("watchdog:\n  env: debug\n  period: 1s\n").unwrap();
        assert!(cfg.is_debug());
        assert!(!cfg.is_prod());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(VALID.as_bytes()).expect("write config");

        let cfg = Config::load(file.path()).unwrap();
        assert_eq!(cfg.checks()[0].name, "db");

        let path = file.path().to_path_buf();
        file.close().expect("close tempfile");
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_duplicate_check_name_last_one_wins() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let first = tmp.path().join("first.heartbeat");
        let second = tmp.path().join("second.heartbeat");
        let yaml = format!(
            "watchdog:\n  env: test\n  period: 1s\n  checks:\n    - name: db\n      path: {}\n      window: 10s\n    - name: db\n      path: {}\n      window: 10s\n",
            first.display(),
            second.display()
        );

        let cfg = Config::parse(&yaml).unwrap();
        assert_eq!(cfg.checks().len(), 2);

        let supervisor = cfg.build_supervisor().unwrap();
        assert_eq!(supervisor.len(), 1);

        // Only the second entry is registered, so the first file is irrelevant.
        std::fs::remove_file(&first).unwrap();
        assert!(supervisor.check_all().is_ok());

        std::fs::remove_file(&second).unwrap();
        assert_eq!(supervisor.check_all().unwrap_err().names(), ["db"]);
    }

    #[test]
    fn test_build_supervisor_registers_checks() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let cfg = new_test_config(
            tmp.path(),
            &[("alpha", Duration::from_secs(5)), ("beta", Duration::from_secs(5))],
        );
        let supervisor = cfg.build_supervisor().unwrap();

        assert!(cfg.is_test());
        assert_eq!(supervisor.names(), vec!["alpha".to_string(), "beta".to_string()]);
        assert!(supervisor.check_all().is_ok());

        for check in cfg.checks() {
            std::fs::remove_file(&check.path).unwrap();
        }
        assert_eq!(supervisor.check_all().unwrap_err().names(), ["alpha", "beta"]);
    }
}
