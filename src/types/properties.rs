use serde_derive::{Deserialize, Serialize};

//------------ Properties ----------------------------------------------------

/// All properties found in one `browscap.csv` record.
///
/// The field order mirrors the catalog columns; `property_name` is the
/// browscap pattern itself and doubles as the key the record is stored
/// under in the key-value store. Values are kept verbatim as strings,
/// including the `"true"`/`"false"` literals, so the record round-trips
/// exactly. Coercion is left to downstream consumers.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    #[serde(rename = "PropertyName")]
    pub property_name: String,
    #[serde(rename = "MasterParent")]
    pub master_parent: String,
    #[serde(rename = "LiteMode")]
    pub lite_mode: String,
    #[serde(rename = "Parent")]
    pub parent: String,
    #[serde(rename = "Comment")]
    pub comment: String,
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "Browser_Type")]
    pub browser_type: String,
    #[serde(rename = "Browser_Bits")]
    pub browser_bits: String,
    #[serde(rename = "Browser_Maker")]
    pub browser_maker: String,
    #[serde(rename = "Browser_Modus")]
    pub browser_modus: String,
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "MajorVer")]
    pub major_ver: String,
    #[serde(rename = "MinorVer")]
    pub minor_ver: String,
    #[serde(rename = "Platform")]
    pub platform: String,
    #[serde(rename = "Platform_Version")]
    pub platform_version: String,
    #[serde(rename = "Platform_Description")]
    pub platform_description: String,
    #[serde(rename = "Platform_Bits")]
    pub platform_bits: String,
    #[serde(rename = "Platform_Maker")]
    pub platform_maker: String,
    #[serde(rename = "Alpha")]
    pub alpha: String,
    #[serde(rename = "Beta")]
    pub beta: String,
    #[serde(rename = "Win16")]
    pub win16: String,
    #[serde(rename = "Win32")]
    pub win32: String,
    #[serde(rename = "Win64")]
    pub win64: String,
    #[serde(rename = "Frames")]
    pub frames: String,
    #[serde(rename = "IFrames")]
    pub iframes: String,
    #[serde(rename = "Tables")]
    pub tables: String,
    #[serde(rename = "Cookies")]
    pub cookies: String,
    #[serde(rename = "BackgroundSounds")]
    pub background_sounds: String,
    #[serde(rename = "JavaScript")]
    pub javascript: String,
    #[serde(rename = "VBScript")]
    pub vbscript: String,
    #[serde(rename = "JavaApplets")]
    pub java_applets: String,
    #[serde(rename = "ActiveXControls")]
    pub activex_controls: String,
    #[serde(rename = "isMobileDevice")]
    pub is_mobile_device: String,
    #[serde(rename = "isTablet")]
    pub is_tablet: String,
    #[serde(rename = "isSyndicationReader")]
    pub is_syndication_reader: String,
    #[serde(rename = "Crawler")]
    pub crawler: String,
    #[serde(rename = "isFake")]
    pub is_fake: String,
    #[serde(rename = "isAnonymized")]
    pub is_anonymized: String,
    #[serde(rename = "isModified")]
    pub is_modified: String,
    #[serde(rename = "CssVersion")]
    pub css_version: String,
    #[serde(rename = "AolVersion")]
    pub aol_version: String,
    #[serde(rename = "Device_Name")]
    pub device_name: String,
    #[serde(rename = "Device_Maker")]
    pub device_maker: String,
    #[serde(rename = "Device_Type")]
    pub device_type: String,
    #[serde(rename = "Device_Pointing_Method")]
    pub device_pointing_method: String,
    #[serde(rename = "Device_Code_Name")]
    pub device_code_name: String,
    #[serde(rename = "Device_Brand_Name")]
    pub device_brand_name: String,
    #[serde(rename = "RenderingEngine_Name")]
    pub rendering_engine_name: String,
    #[serde(rename = "RenderingEngine_Version")]
    pub rendering_engine_version: String,
    #[serde(rename = "RenderingEngine_Description")]
    pub rendering_engine_description: String,
    #[serde(rename = "RenderingEngine_Maker")]
    pub rendering_engine_maker: String,
}

impl Properties {
    /// The browscap pattern this record belongs to.
    pub fn pattern(&self) -> &str {
        &self.property_name
    }
}
