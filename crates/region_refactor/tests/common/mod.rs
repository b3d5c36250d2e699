// crates/region_refactor/tests/common/mod.rs

#![allow(dead_code)]

use region_refactor::RefactorConfig;

pub const PROFILE_VIEW: &str = r#"export const DriverProfileView = ({ driverData }: any) => {
  const [activeTab, setActiveTab] = useState('Overview');
  const [viewingAccident, setViewingAccident] = useState(null);
  return (
        <div>
            {/* ACCIDENTS TAB */}
            {activeTab === 'Accidents' && (() => {
              const rows = driverData.accidents;
              return <AccidentList rows={rows} onOpen={(a: any) => setViewingAccident(a)} />;
            })()}

            {/* ACCIDENT DETAIL POPUP */}
            {viewingAccident && <Popup item={viewingAccident} />}

            {/* INSPECTIONS TAB */}
            {activeTab === 'Inspections' && (() => {
              return <InspectionList items={driverData.inspections} />;
            })()}

            {/* VIOLATIONS TAB */}
            {activeTab === 'Violations' && (() => {
              const open = driverData.violations.filter((v: any) => v.open);
              return <ViolationList items={open} />;
            })()}

            {['Training', 'Certificates'].includes(activeTab) && (() => {
              return <Placeholder tab={activeTab} />;
            })()}

            {activeTab === 'Violations' && (
              <div className="space-y-6">
                <OldViolations data={driverData} />
              </div>
            )}
        </div>
  );
};
"#;

/// Everything up to the appended declarations after a successful run.
pub const EXPECTED_HEAD: &str = r#"export const DriverProfileView = ({ driverData }: any) => {
  const [activeTab, setActiveTab] = useState('Overview');
  const [viewingAccident, setViewingAccident] = useState(null);
  return (
        <div>
            {/* ACCIDENTS TAB */}
            {activeTab === 'Accidents' && <AccidentsTab driverData={driverData} setViewingAccident={setViewingAccident} />}
            {/* ACCIDENT DETAIL POPUP */}
            {viewingAccident && <Popup item={viewingAccident} />}

            {/* INSPECTIONS TAB */}
            {activeTab === 'Inspections' && <InspectionsTab driverData={driverData} />}
            {/* VIOLATIONS TAB */}
            {activeTab === 'Violations' && <ViolationsTab driverData={driverData} />}
            {['Training', 'Certificates'].includes(activeTab) && (() => {
              return <Placeholder tab={activeTab} />;
            })()}

        </div>
  );
};
"#;

pub const ACCIDENTS_BODY: &str = concat!(
    "\n",
    "              const rows = driverData.accidents;\n",
    "              return <AccidentList rows={rows} onOpen={(a: any) => setViewingAccident(a)} />;\n",
    "            "
);

pub const INSPECTIONS_BODY: &str = concat!(
    "\n",
    "              return <InspectionList items={driverData.inspections} />;\n",
    "            "
);

pub const VIOLATIONS_BODY: &str = concat!(
    "\n",
    "              const open = driverData.violations.filter((v: any) => v.open);\n",
    "              return <ViolationList items={open} />;\n",
    "            "
);

pub const CONFIG: &str = r#"
scope = ["activeTab", "setActiveTab", "driverData", "viewingAccident", "setViewingAccident"]

[[region]]
name = "accidents"
start = "{/* ACCIDENTS TAB */}"
end = "            {/* ACCIDENT DETAIL POPUP */}"
unit = "AccidentsTab"
parameters = ["driverData", "setViewingAccident"]
condition = "activeTab === 'Accidents'"

[[region]]
name = "inspections"
start = "{/* INSPECTIONS TAB */}"
end = "            {/* VIOLATIONS TAB */}"
unit = "InspectionsTab"
parameters = ["driverData"]
condition = "activeTab === 'Inspections'"

[[region]]
name = "violations"
start = "{/* VIOLATIONS TAB */}"
end = "            {['Training', 'Certificates']"
unit = "ViolationsTab"
parameters = ["driverData"]
condition = "activeTab === 'Violations'"

[duplicate]
start = "            {activeTab === 'Violations' && (\n"
end = "        </div>\n  );"
"#;

pub fn config() -> RefactorConfig {
    RefactorConfig::from_toml_str(CONFIG).expect("fixture config parses")
}

/// The full document expected after one run over [`PROFILE_VIEW`].
pub fn expected_document() -> String {
    format!(
        "{}\n{}\n{}\n{}\n\n{}\n{}\n{}\n\n{}\n{}\n{}\n",
        EXPECTED_HEAD,
        "export const AccidentsTab = ({ driverData, setViewingAccident }: any) => {",
        ACCIDENTS_BODY,
        "};",
        "export const InspectionsTab = ({ driverData }: any) => {",
        INSPECTIONS_BODY,
        "};",
        "export const ViolationsTab = ({ driverData }: any) => {",
        VIOLATIONS_BODY,
        "};",
    )
}
