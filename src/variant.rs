use std::fmt;

use serde::Deserialize;

/// Where the HTTP trigger is served from.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hosting {
    #[serde(rename = "cf", alias = "function")]
    Function,
    #[default]
    #[serde(rename = "cr", alias = "container")]
    Container,
    #[serde(rename = "gae", alias = "platform")]
    Platform,
}

impl Hosting {
    pub fn as_str(self) -> &'static str {
        match self {
            Hosting::Function => "cf",
            Hosting::Container => "cr",
            Hosting::Platform => "gae",
        }
    }

    /// Container and platform deployments answer GET with the default count
    /// and read `n` from POST bodies. Functions take any method and always
    /// look at the body.
    pub fn accepts_get_default(self) -> bool {
        !matches!(self, Hosting::Function)
    }
}

/// Which client binding talks to Pub/Sub.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Binding {
    #[serde(rename = "apiary", alias = "rest")]
    Apiary,
    #[default]
    #[serde(rename = "cl_mixed", alias = "client")]
    ClientLibrary,
    #[serde(rename = "gapic")]
    Gapic,
}

impl Binding {
    pub fn as_str(self) -> &'static str {
        match self {
            Binding::Apiary => "apiary",
            Binding::ClientLibrary => "cl_mixed",
            Binding::Gapic => "gapic",
        }
    }

    pub fn default_topic(self) -> &'static str {
        match self {
            Binding::Apiary => "apiary",
            Binding::ClientLibrary => "standard",
            Binding::Gapic => "gapic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Variant {
    pub hosting: Hosting,
    pub binding: Binding,
}

impl Variant {
    pub fn new(hosting: Hosting, binding: Binding) -> Self {
        Self { hosting, binding }
    }

    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Count used when the trigger carries no `n`.
    pub fn default_count(&self) -> u32 {
        match (self.hosting, self.binding) {
            (Hosting::Container, Binding::Gapic) => 1,
            _ => 10,
        }
    }

    pub fn acknowledgement(&self) -> &'static str {
        match self.hosting {
            Hosting::Function => "Published messages.",
            Hosting::Container | Hosting::Platform => "Published messages.\n",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.hosting.as_str(), self.binding.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_hosting_and_binding() {
        assert_eq!(
            Variant::new(Hosting::Container, Binding::ClientLibrary).name(),
            "cr_cl_mixed"
        );
        assert_eq!(
            Variant::new(Hosting::Function, Binding::Gapic).name(),
            "cf_gapic"
        );
        assert_eq!(
            Variant::new(Hosting::Platform, Binding::Apiary).name(),
            "gae_apiary"
        );
    }

    #[test]
    fn default_count_is_ten_except_container_gapic() {
        for hosting in [Hosting::Function, Hosting::Container, Hosting::Platform] {
            for binding in [Binding::Apiary, Binding::ClientLibrary, Binding::Gapic] {
                let expected = if (hosting, binding) == (Hosting::Container, Binding::Gapic) {
                    1
                } else {
                    10
                };
                assert_eq!(Variant::new(hosting, binding).default_count(), expected);
            }
        }
    }

    #[test]
    fn functions_acknowledge_without_newline() {
        let cf = Variant::new(Hosting::Function, Binding::Apiary);
        let gae = Variant::new(Hosting::Platform, Binding::Apiary);
        assert_eq!(cf.acknowledgement(), "Published messages.");
        assert_eq!(gae.acknowledgement(), "Published messages.\n");
        assert!(!Hosting::Function.accepts_get_default());
        assert!(Hosting::Container.accepts_get_default());
    }

    #[test]
    fn topics_per_binding() {
        assert_eq!(Binding::Apiary.default_topic(), "apiary");
        assert_eq!(Binding::ClientLibrary.default_topic(), "standard");
        assert_eq!(Binding::Gapic.default_topic(), "gapic");
    }
}
