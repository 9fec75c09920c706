use super::tag::wire_enum;

wire_enum! {
    /// The `object` field of every top-level API record.
    pub enum ObjectType (fallback = Unsupported) {
        Database => "database",
        Page => "page",
        Block => "block",
        Comment => "comment",
        User => "user",
        List => "list",
        Unsupported => "unsupported",
    }
}

wire_enum! {
    /// Property type tags, shared by database schemas and page values.
    pub enum PropType (fallback = Unsupported) {
        Unsupported => "unsupported",
        Checkbox => "checkbox",
        CreatedBy => "created_by",
        CreatedTime => "created_time",
        Date => "date",
        Email => "email",
        Files => "files",
        Formula => "formula",
        LastEditedBy => "last_edited_by",
        LastEditedTime => "last_edited_time",
        MultiSelect => "multi_select",
        Number => "number",
        People => "people",
        PhoneNumber => "phone_number",
        Relation => "relation",
        Rollup => "rollup",
        RichText => "rich_text",
        Select => "select",
        Status => "status",
        Title => "title",
        Url => "url",
    }
}

wire_enum! {
    pub enum FileType (fallback = Unsupported) {
        File => "file",
        External => "external",
        Unsupported => "unsupported",
    }
}

wire_enum! {
    pub enum MentionType (fallback = Unsupported) {
        Unsupported => "unsupported",
        User => "user",
        Page => "page",
        Database => "database",
        Date => "date",
        LinkPreview => "link_preview",
    }
}

wire_enum! {
    pub enum RichTextType (fallback = Unsupported) {
        Unsupported => "unsupported",
        Text => "text",
        Mention => "mention",
        Equation => "equation",
    }
}

wire_enum! {
    pub enum UserType (fallback = Unsupported) {
        Unsupported => "unsupported",
        Person => "person",
        Bot => "bot",
    }
}

wire_enum! {
    /// Who owns a bot integration.
    pub enum BotOwner (fallback = Unsupported) {
        User => "user",
        Workspace => "workspace",
        Unsupported => "unsupported",
    }
}

wire_enum! {
    /// How a relation property links its two databases.
    pub enum RelationType (fallback = Unsupported) {
        SingleProperty => "single_property",
        DualProperty => "dual_property",
        Unsupported => "unsupported",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WireTag;

    #[test]
    fn test_unknown_tags_resolve_to_unsupported() {
        assert_eq!(PropType::from_wire("button"), PropType::Unsupported);
        assert_eq!(ObjectType::from_wire("data_source"), ObjectType::Unsupported);
        assert_eq!(MentionType::from_wire("template_mention"), MentionType::Unsupported);
        assert_eq!(RichTextType::from_wire(""), RichTextType::Unsupported);
        assert_eq!(UserType::from_wire("agent"), UserType::Unsupported);
        assert_eq!(FileType::from_wire("file_upload"), FileType::Unsupported);
    }

    #[test]
    fn test_tags_match_case_insensitively() {
        assert_eq!(PropType::from_wire("Multi_Select"), PropType::MultiSelect);
        assert_eq!(MentionType::from_wire("LINK_PREVIEW"), MentionType::LinkPreview);
        assert_eq!(PropType::lookup("TITLE"), Some(PropType::Title));
        assert_eq!(PropType::lookup("button"), None);
    }

    #[test]
    fn test_every_prop_type_round_trips() {
        for tag in PropType::ALL {
            assert_eq!(PropType::from_wire(tag.as_str()), *tag);
        }
        assert_eq!(PropType::ALL.len(), 21);
    }
}
