// @generated by threshold_config_compiler from config/force.toml. Do not edit.

pub static FORCE_CONFIG: ForceConfig = ForceConfig {
    thresholds: &[0.25, 0.5, 0.75],
    squeeze: SqueezeConfig {
        threshold: 0.5,
        force_capable: true,
    },
};
