// Implements help messages for keys
// with value as description of the keys.
#[derive(Default, Debug)]
pub struct HelpKV {
    pub key: String,
    pub typ: String,
    pub description: String,
    pub optional: bool,
}

#[derive(Default, Debug)]
pub struct HelpKVS(pub Vec<HelpKV>);

impl HelpKVS {
    pub fn iter(&self) -> std::slice::Iter<'_, HelpKV> {
        self.0.iter()
    }
}
