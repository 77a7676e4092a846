/// Metadata and current value of an automatable parameter exposed by the
/// hosted plugin.
#[derive(Debug, Clone)]
pub struct PluginParam {
    pub index: usize,
    pub id: String,
    pub name: String,
    pub value: f32,
    pub default: f32,
    pub min: f32,
    pub max: f32,
}

impl PluginParam {
    pub fn normalised(&self) -> f32 {
        if (self.max - self.min).abs() <= f32::EPSILON {
            0.0
        } else {
            (self.value - self.min) / (self.max - self.min)
        }
    }

    pub fn set_from_normalised(&mut self, value: f32) {
        self.value = self.min + value.clamp(0.0, 1.0) * (self.max - self.min);
    }
}

/// Placeholder parameter bank used until format-specific parameter queries
/// are wired up.
pub(crate) fn placeholder_bank(count: usize) -> Vec<PluginParam> {
    (0..count)
        .map(|index| PluginParam {
            index,
            id: format!("param_{index}"),
            name: format!("Parameter {index}"),
            value: 0.5,
            default: 0.5,
            min: 0.0,
            max: 1.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalised_maps_into_unit_range() {
        let mut param = PluginParam {
            index: 0,
            id: "cutoff".into(),
            name: "Cutoff".into(),
            value: 50.0,
            default: 50.0,
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(param.normalised(), 0.5);
        param.set_from_normalised(0.25);
        assert_eq!(param.value, 25.0);
    }

    #[test]
    fn degenerate_range_normalises_to_zero() {
        let param = PluginParam {
            index: 0,
            id: "fixed".into(),
            name: "Fixed".into(),
            value: 1.0,
            default: 1.0,
            min: 1.0,
            max: 1.0,
        };
        assert_eq!(param.normalised(), 0.0);
    }

    #[test]
    fn set_from_normalised_clamps_input() {
        let mut param = placeholder_bank(1).remove(0);
        param.set_from_normalised(2.0);
        assert_eq!(param.value, 1.0);
        param.set_from_normalised(-1.0);
        assert_eq!(param.value, 0.0);
    }
}
