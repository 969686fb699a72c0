//! Histogrammar build descriptors: the shared skeleton, the fragment library
//! and the target matrix for the `core`, `sparksql` and `bokeh` modules.

use crate::error::Result;
use crate::fragment::FragmentLibrary;
use crate::matrix::{ContextSpec, MatrixSpec, ModuleSpec, ProjectInfo, RuntimeBundle};
use crate::params::ParameterSet;
use crate::skeleton::Skeleton;
use crate::target::{DeploymentContext, FragmentSelection};

/// The single project version shared by every module and variant.
pub const PROJECT_VERSION: &str = "1.0.4";

const HEADER: &str = r#"<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/maven-v4_0_0.xsd">
  <modelVersion>4.0.0</modelVersion>

  <!-- Copyright 2016 Jim Pivarski                                                 -->
  <!--                                                                             -->
  <!-- Licensed under the Apache License, Version 2.0 (the "License");             -->
  <!-- you may not use this file except in compliance with the License.            -->
  <!-- You may obtain a copy of the License at                                     -->
  <!--                                                                             -->
  <!--     http://www.apache.org/licenses/LICENSE-2.0                              -->
  <!--                                                                             -->
  <!-- Unless required by applicable law or agreed to in writing, software         -->
  <!-- distributed under the License is distributed on an "AS IS" BASIS,           -->
  <!-- WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.    -->
  <!-- See the License for the specific language governing permissions and         -->
  <!-- limitations under the License.                                              -->

  <name>"#;

const PEOPLE: &str = r#"</version>
  <packaging>jar</packaging>

  <licenses>
    <license>
      <name>Apache License, Version 2.0</name>
      <url>http://www.apache.org/licenses/LICENSE-2.0</url>
      <distribution>repo</distribution>
    </license>
  </licenses>

  <developers>
    <developer>
      <name>Jim Pivarski</name>
      <email>jpivarski@gmail.com</email>
      <organization>DIANA-HEP</organization>
      <organizationUrl>http://diana-hep.org</organizationUrl>
    </developer>
  </developers>

  <scm>
    <connection>scm:git:git@github.com:histogrammar/histogrammar-scala.git</connection>
    <developerConnection>scm:git:git@github.com:histogrammar/histogrammar-scala.git</developerConnection>
    <url>git@github.com:histogrammar/histogrammar-scala.git</url>
  </scm>

"#;

const REPORTING: &str = r#"  <reporting>
    <plugins>
      <plugin>
        <groupId>org.scala-tools</groupId>
        <artifactId>maven-scala-plugin</artifactId>
        <version>2.15.2</version>
      </plugin>
    </plugins>
  </reporting>

  <properties>
    <encoding>UTF-8</encoding>
    <project.build.sourceEncoding>UTF-8</project.build.sourceEncoding>
"#;

const REPOSITORIES: &str = r#"  </dependencies>

  <repositories>
    <repository>
      <id>central</id>
      <name>Central Repository</name>
      <url>http://repo1.maven.org/maven2</url>
      <layout>default</layout>
      <snapshots>
        <enabled>false</enabled>
      </snapshots>
    </repository>
  </repositories>

  <pluginRepositories>
    <pluginRepository>
      <id>central</id>
      <name>Maven Plugin Repository</name>
      <url>http://repo1.maven.org/maven2</url>
      <layout>default</layout>
      <snapshots>
        <enabled>false</enabled>
      </snapshots>
      <releases>
        <updatePolicy>never</updatePolicy>
      </releases>
    </pluginRepository>
  </pluginRepositories>

  <build>
    <plugins>

      <plugin>
        <!-- see http://davidb.github.com/scala-maven-plugin -->
        <groupId>net.alchim31.maven</groupId>
        <artifactId>scala-maven-plugin</artifactId>
        <version>3.2.2</version>
        <executions>
          <execution>
            <goals>
              <goal>compile</goal>
              <goal>testCompile</goal>
            </goals>
            <configuration>
              <args>
                <arg>-Dscalac.patmat.analysisBudget=512</arg>
                <arg>-deprecation</arg>
                <arg>-feature</arg>
                <arg>-unchecked</arg>
                <arg>-dependencyfile</arg>
                <arg>${project.build.directory}/.scala_dependencies</arg>
              </args>
              <recompileMode>incremental</recompileMode>
              <!-- <useZincServer>true</useZincServer> -->
            </configuration>
          </execution>
"#;

const INSTALL_AND_SOURCE: &str = r#"
      <plugin>
        <artifactId>maven-install-plugin</artifactId>
        <version>2.5.2</version>
        <configuration>
          <createChecksum>true</createChecksum>
        </configuration>
      </plugin>

      <plugin>
        <groupId>org.apache.maven.plugins</groupId>
        <artifactId>maven-source-plugin</artifactId>
        <version>2.2.1</version>
        <executions>
          <execution>
            <id>attach-sources</id>
            <goals>
              <goal>jar-no-fork</goal>
            </goals>
          </execution>
        </executions>
      </plugin>

"#;

const RESOURCES: &str = r#"    <resources>
    </resources>

    <testResources>
    </testResources>
  </build>

"#;

const JAVA_LEVEL: &str = r#"    <maven.compiler.source>{{java_version}}</maven.compiler.source>
    <maven.compiler.target>{{java_version}}</maven.compiler.target>
"#;

const SOURCE_JAR: &str = r#"          <execution>
            <id>attach-sources</id>
            <goals>
              <goal>add-source</goal>
            </goals>
          </execution>
"#;

const JAVADOC_JAR: &str = r#"          <execution>
            <id>attach-javadocs</id>
            <goals>
              <goal>doc-jar</goal>
            </goals>
          </execution>
"#;

const SCALATEST: &str = r#"      <plugin>
        <groupId>org.scalatest</groupId>
        <artifactId>scalatest-maven-plugin</artifactId>
        <version>1.0</version>
        <configuration>
          <reportsDirectory>${project.build.directory}/surefire-reports</reportsDirectory>
          <junitxml>.</junitxml>
        </configuration>
        <executions>
          <execution>
            <id>test</id>
            <goals>
              <goal>test</goal>
            </goals>
          </execution>
        </executions>
      </plugin>

"#;

const COPY_DEPENDENCIES: &str = r#"      <plugin>
        <groupId>org.apache.maven.plugins</groupId>
        <artifactId>maven-dependency-plugin</artifactId>
        <version>2.10</version>
        <executions>
          <execution>
            <phase>package</phase>
            <goals>
              <goal>copy-dependencies</goal>
            </goals>
            <configuration>
              <outputDirectory>
                target/lib
              </outputDirectory>
            </configuration>
          </execution>
        </executions>
      </plugin>
"#;

const GPG_PLUGIN: &str = r#"      <plugin>
        <groupId>org.apache.maven.plugins</groupId>
        <artifactId>maven-gpg-plugin</artifactId>
        <version>1.6</version>
        <executions>
          <execution>
            <id>sign-artifacts</id>
            <phase>verify</phase>
            <goals>
              <goal>sign</goal>
            </goals>
          </execution>
        </executions>
      </plugin>

"#;

const STAGING_PLUGIN: &str = r#"      <plugin>
        <groupId>org.sonatype.plugins</groupId>
        <artifactId>nexus-staging-maven-plugin</artifactId>
        <version>1.6.7</version>
        <extensions>true</extensions>
        <configuration>
          <serverId>ossrh</serverId>
          <nexusUrl>https://oss.sonatype.org/</nexusUrl>
          <autoReleaseAfterClose>true</autoReleaseAfterClose>
        </configuration>
      </plugin>

"#;

const PLUGIN_MANAGEMENT: &str = r#"    <pluginManagement>
      <plugins>
        <plugin>
          <groupId>org.apache.maven.plugins</groupId>
          <artifactId>maven-release-plugin</artifactId>
          <version>2.5</version>
          <configuration>
            <useReleaseProfile>false</useReleaseProfile>
            <pushChanges>false</pushChanges>
            <localCheckout>true</localCheckout>
            <goals>deploy</goals>
          </configuration>
        </plugin>
      </plugins>
    </pluginManagement>

"#;

const DISTRIBUTION_MANAGEMENT: &str = r#"  <distributionManagement>
    <snapshotRepository>
      <id>ossrh</id>
      <url>https://oss.sonatype.org/content/repositories/snapshots</url>
    </snapshotRepository>
    <repository>
      <id>ossrh</id>
      <url>https://oss.sonatype.org/service/local/staging/deploy/maven2/</url>
    </repository>
  </distributionManagement>

"#;

const DEP_SCALA_LIBRARY: &str = r#"    <dependency>
      <groupId>org.scala-lang</groupId>
      <artifactId>scala-library</artifactId>
      <version>{{scala_version}}</version>
    </dependency>

"#;

const DEP_SCALATEST: &str = r#"    <dependency>
      <groupId>org.scalatest</groupId>
      <artifactId>scalatest_{{scala_binary_version}}</artifactId>
      <version>{{scalatest_version}}</version>
      <scope>test</scope>
    </dependency>

"#;

const DEP_HISTOGRAMMAR: &str = r#"    <dependency>
      <groupId>{{group_id}}</groupId>
      <artifactId>histogrammar_{{scala_binary_version}}</artifactId>
      <version>{{version}}</version>
    </dependency>

"#;

const DEP_SPARK_SQL: &str = r#"    <dependency>
      <groupId>org.apache.spark</groupId>
      <artifactId>spark-sql_{{scala_binary_version}}</artifactId>
      <version>{{spark_version}}</version>
      <scope>provided</scope>
    </dependency>

"#;

const DEP_BOKEH: &str = r#"    <dependency>
      <groupId>io.continuum.bokeh</groupId>
      <artifactId>bokeh_{{scala_binary_version}}</artifactId>
      <version>{{bokeh_version}}</version>
    </dependency>

"#;

/// Builds the descriptor skeleton shared by every target.
pub fn skeleton() -> Result<Skeleton> {
    Skeleton::builder()
        .literal(HEADER)
        .param("name")
        .literal("</name>\n  <description>")
        .param("description")
        .literal("</description>\n  <url>")
        .param("project_url")
        .literal("</url>\n  <inceptionYear>")
        .param("inception_year")
        .literal("</inceptionYear>\n\n  <groupId>")
        .param("group_id")
        .literal("</groupId>\n  <artifactId>")
        .param("artifact_id")
        .literal("</artifactId>\n  <version>")
        .param("version")
        .literal(PEOPLE)
        .slot("profiles")
        .literal(REPORTING)
        .slot("java_version")
        .literal("  </properties>\n\n  <dependencies>\n")
        .slot("dependencies")
        .literal(REPOSITORIES)
        .slot("scala_executions")
        .literal("\n        </executions>\n      </plugin>\n\n")
        .slot("build_plugins")
        .literal(INSTALL_AND_SOURCE)
        .slot("release_plugins")
        .literal("    </plugins>\n\n")
        .slot("plugin_management")
        .literal(RESOURCES)
        .slot("distribution_management")
        .literal("</project>\n")
        .build()
}

/// Renders the build-profile block selecting between runtime variants.
///
/// The first bundle is active by default; the others are activated by a
/// property named after their profile id.
pub fn profiles_fragment(bundles: &[RuntimeBundle]) -> String {
    let mut out = String::from("  <profiles>\n");
    for (i, bundle) in bundles.iter().enumerate() {
        let profile_id = bundle.profile_id();
        let activation = if i == 0 {
            "        <activeByDefault>true</activeByDefault>\n".to_string()
        } else {
            format!("        <property><name>{profile_id}</name></property>\n")
        };
        out.push_str(&format!(
            "    <profile>\n      <id>{profile_id}</id>\n      <activation>\n{activation}      </activation>\n      <properties>\n"
        ));
        for (property, value) in [
            ("scala.version", &bundle.runtime_version),
            ("scala.binary.version", &bundle.binary_version),
            ("maven.compiler.source", &bundle.language_level),
            ("maven.compiler.target", &bundle.language_level),
            ("spark.version", &bundle.spark_version),
        ] {
            out.push_str(&format!("        <{property}>{value}</{property}>\n"));
        }
        out.push_str("      </properties>\n    </profile>\n\n");
    }
    out.push_str("  </profiles>\n\n");
    out
}

/// Defines every fragment used by the histogrammar targets.
pub fn library(bundles: &[RuntimeBundle]) -> Result<FragmentLibrary> {
    let mut library = FragmentLibrary::new();
    library.define("profiles", profiles_fragment(bundles))?;
    library.define("javaversion", JAVA_LEVEL)?;
    library.define("sourcejar", SOURCE_JAR)?;
    library.define("javadocjar", JAVADOC_JAR)?;
    library.define("scalatest", SCALATEST)?;
    library.define("copydependencies", COPY_DEPENDENCIES)?;
    library.define("gpgplugin", GPG_PLUGIN)?;
    library.define("stagingplugin", STAGING_PLUGIN)?;
    library.define("pluginmanagement", PLUGIN_MANAGEMENT)?;
    library.define("distributionmanagement", DISTRIBUTION_MANAGEMENT)?;
    library.define("dep-scala-library", DEP_SCALA_LIBRARY)?;
    library.define("dep-scalatest", DEP_SCALATEST)?;
    library.define("dep-histogrammar", DEP_HISTOGRAMMAR)?;
    library.define("dep-spark-sql", DEP_SPARK_SQL)?;
    library.define("dep-bokeh", DEP_BOKEH)?;
    Ok(library)
}

fn module(
    id: &str,
    name: &str,
    description: &str,
    dependencies: &[&str],
    plugins: &[&str],
) -> ModuleSpec {
    let mut selection = FragmentSelection::new();
    selection.fill("dependencies", dependencies.iter().copied());
    selection.fill("build_plugins", plugins.iter().copied());
    ModuleSpec {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        artifact_base: name.to_string(),
        selection,
    }
}

fn bundle(binary: &str, runtime: &str, language_level: &str, spark: &str) -> RuntimeBundle {
    RuntimeBundle {
        binary_version: binary.to_string(),
        runtime_version: runtime.to_string(),
        language_level: language_level.to_string(),
        spark_version: spark.to_string(),
    }
}

/// The histogrammar target matrix.
pub fn matrix() -> MatrixSpec {
    let mut local = FragmentSelection::new();
    local.fill("profiles", ["profiles"]).fill("build_plugins", ["copydependencies"]);

    let mut release = FragmentSelection::new();
    release
        .fill("java_version", ["javaversion"])
        .fill("scala_executions", ["sourcejar", "javadocjar"])
        .fill("release_plugins", ["gpgplugin", "stagingplugin"])
        .fill("plugin_management", ["pluginmanagement"])
        .fill("distribution_management", ["distributionmanagement"]);

    MatrixSpec {
        project: ProjectInfo {
            group_id: "org.diana-hep".to_string(),
            url: "http://histogrammar.org".to_string(),
            inception_year: "2016".to_string(),
            version: PROJECT_VERSION.to_string(),
        },
        bundles: vec![
            bundle("2.10", "2.10.6", "1.7", "1.6.2"),
            bundle("2.11", "2.11.8", "1.8", "2.0.0"),
        ],
        companions: ParameterSet::new()
            .with("scalatest_version", "2.2.5")
            .with("bokeh_version", "0.7"),
        modules: vec![
            module(
                "core",
                "histogrammar",
                "Histogram abstraction to simplify complex aggregations in distributed environments.",
                &["dep-scala-library", "dep-scalatest"],
                &["scalatest"],
            ),
            module(
                "sparksql",
                "histogrammar-sparksql",
                "Adapter for using Histogrammar in SparkSQL.",
                &["dep-scala-library", "dep-histogrammar", "dep-spark-sql"],
                &[],
            ),
            module(
                "bokeh",
                "histogrammar-bokeh",
                "Adapter for using Histogrammar to generate Bokeh plots.",
                &["dep-scala-library", "dep-histogrammar", "dep-bokeh"],
                &[],
            ),
        ],
        contexts: vec![
            ContextSpec {
                context: DeploymentContext::Local,
                per_variant: false,
                file_name: "pom.xml".to_string(),
                selection: local,
            },
            ContextSpec {
                context: DeploymentContext::Release,
                per_variant: true,
                file_name: "deploy-scala-{{scala_binary_version}}.xml".to_string(),
                selection: release,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_defines_every_selected_fragment() {
        let spec = matrix();
        let library = library(&spec.bundles).unwrap();
        for module in &spec.modules {
            for slot in module.selection.slots() {
                for name in module.selection.get(slot).unwrap() {
                    assert!(library.contains(name), "missing fragment {name}");
                }
            }
        }
        for context in &spec.contexts {
            for slot in context.selection.slots() {
                for name in context.selection.get(slot).unwrap() {
                    assert!(library.contains(name), "missing fragment {name}");
                }
            }
        }
    }

    #[test]
    fn test_every_selected_slot_exists_in_skeleton() {
        let skeleton = skeleton().unwrap();
        let spec = matrix();
        for selection in spec
            .modules
            .iter()
            .map(|m| &m.selection)
            .chain(spec.contexts.iter().map(|c| &c.selection))
        {
            for slot in selection.slots() {
                assert!(skeleton.has_slot(slot), "missing slot {slot}");
            }
        }
    }

    #[test]
    fn test_profiles_fragment() {
        let spec = matrix();
        let profiles = profiles_fragment(&spec.bundles);
        assert!(profiles.starts_with("  <profiles>\n    <profile>\n      <id>scala-2.10</id>\n"));
        assert!(profiles.contains("<activeByDefault>true</activeByDefault>"));
        assert!(profiles.contains("<property><name>scala-2.11</name></property>"));
        assert!(profiles.contains("<spark.version>1.6.2</spark.version>"));
        assert!(profiles.contains("<maven.compiler.target>1.8</maven.compiler.target>"));
        assert!(profiles.ends_with("    </profile>\n\n  </profiles>\n\n"));
    }
}
