#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lang {
    En,
    Es,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringId {
    ContinueReading,
    NoOpenBook,
    Library,
    Recent,
    Files,
    Settings,
    Transfer,
    Wifi,
    Hotspot,
}

pub fn tr(lang: Lang, id: StringId) -> &'static str {
    match lang {
        Lang::En => match id {
            StringId::ContinueReading => "Continue reading",
            StringId::NoOpenBook => "No open book",
            StringId::Library => "Library",
            StringId::Recent => "Recent",
            StringId::Files => "Files",
            StringId::Settings => "Settings",
            StringId::Transfer => "Transfer",
            StringId::Wifi => "Wi-Fi",
            StringId::Hotspot => "Hotspot",
        },
        Lang::Es => match id {
            StringId::ContinueReading => "Seguir leyendo",
            StringId::NoOpenBook => "Ningún libro abierto",
            StringId::Library => "Biblioteca",
            StringId::Recent => "Recientes",
            StringId::Files => "Archivos",
            StringId::Settings => "Ajustes",
            StringId::Transfer => "Transferir",
            StringId::Wifi => "Wi-Fi",
            StringId::Hotspot => "Zona Wi-Fi",
        },
    }
}
