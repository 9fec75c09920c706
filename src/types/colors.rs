use super::tag::wire_enum;

wire_enum! {
    /// The colors Notion applies to text, options and groups.
    ///
    /// Unknown colors resolve to [`Color::Default`].
    #[derive(Default)]
    pub enum Color (fallback = Default) {
        #[default]
        Default => "default",
        Gray => "gray",
        Brown => "brown",
        Orange => "orange",
        Yellow => "yellow",
        Green => "green",
        Blue => "blue",
        Purple => "purple",
        Pink => "pink",
        Red => "red",
        GrayBackground => "gray_background",
        BrownBackground => "brown_background",
        OrangeBackground => "orange_background",
        YellowBackground => "yellow_background",
        GreenBackground => "green_background",
        BlueBackground => "blue_background",
        PurpleBackground => "purple_background",
        PinkBackground => "pink_background",
        RedBackground => "red_background",
    }
}

impl Color {
    /// Check if this is a background color
    pub fn is_background(&self) -> bool {
        matches!(
            self,
            Color::GrayBackground
                | Color::BrownBackground
                | Color::OrangeBackground
                | Color::YellowBackground
                | Color::GreenBackground
                | Color::BlueBackground
                | Color::PurpleBackground
                | Color::PinkBackground
                | Color::RedBackground
        )
    }
}
