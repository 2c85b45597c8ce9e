#![allow(dead_code)]

pub mod truncated_server;

pub fn lido_record(url: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<lido:lido xmlns:lido="http://www.lido-schema.org">
  <lido:administrativeMetadata>
    <lido:resourceWrap>
      <lido:resourceSet>
        <lido:resourceRepresentation>
          <lido:linkResource>{url}</lido:linkResource>
        </lido:resourceRepresentation>
      </lido:resourceSet>
    </lido:resourceWrap>
  </lido:administrativeMetadata>
</lido:lido>"#
    )
}

pub const RECORD_WITHOUT_LINK: &str = r#"<lido:lido xmlns:lido="http://www.lido-schema.org">
  <lido:administrativeMetadata>
    <lido:resourceWrap/>
  </lido:administrativeMetadata>
</lido:lido>"#;
