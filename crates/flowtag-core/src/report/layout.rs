pub const TAG_SECTION_TITLE: &str = "Tag Counts:";
pub const TAG_HEADER: &str = "Tag,Count";

pub const PORT_PROTOCOL_SECTION_TITLE: &str = "Port/Protocol Combination Counts:";
pub const PORT_PROTOCOL_HEADER: &str = "Port,Protocol,Count";

pub const FIELD_SEPARATOR: char = ',';
